pub mod acquire;
pub mod advice;
pub mod economics;
pub mod export;
pub mod report;
pub mod suggest;
