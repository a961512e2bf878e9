pub mod registry;
pub mod traits;

// Oracle implementations
pub mod static_oracle;
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
