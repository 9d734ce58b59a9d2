mod common;
mod views;
