pub mod bar;
pub mod order_block;
pub mod result;
pub mod structure;
pub mod swing;
pub mod timeframe;
