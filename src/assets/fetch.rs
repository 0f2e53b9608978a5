//! Platform-specific byte fetching.

use super::LoadError;

/// Fetches an asset relative to the page URL.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| LoadError::Fetch("response is not a Response".to_string()))?;

    if !response.ok() {
        return Err(LoadError::HttpStatus(response.status()));
    }

    let buffer = response
        .array_buffer()
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Reads an asset relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|e| LoadError::Io(format!("{}: {}", path, e)))
}
