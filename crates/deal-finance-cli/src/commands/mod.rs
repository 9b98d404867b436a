pub mod deal;
pub mod financing;
pub mod locale;
pub mod tax;
