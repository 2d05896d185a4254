pub mod calendar;
pub mod entities;
pub mod history;
pub mod normalize;
pub mod roc_date;
