pub mod check;
pub mod highlight;
pub mod outline;
pub mod parse;
