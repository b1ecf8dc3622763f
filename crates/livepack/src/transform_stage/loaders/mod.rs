pub mod css;
pub mod ecmascript;
