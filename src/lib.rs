#[cfg(not(target_arch = "wasm32"))]
pub use tma_shell::bootstrap::run;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        tma_shell::bootstrap::run().map_err(|err| JsValue::from_str(&format!("{err:#}")))
    }
}
