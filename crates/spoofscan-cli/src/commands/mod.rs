pub mod compare;
pub mod detect;
pub mod histogram;
pub mod lbp;
