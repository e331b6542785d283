use pixelboard_core::SourceImage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, HtmlImageElement, Url};

/// A decoded image ready to be drawn onto the board canvas.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub element: HtmlImageElement,
    pub width: u32,
    pub height: u32,
    pub name: String,
}

impl SourceImage for LoadedImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decode a picked file through an `<img>` element.
///
/// Resolves once the browser has finished decoding, so the image is
/// drawable as soon as it is placed. Rejects files the browser cannot decode.
pub async fn load_image(file: File) -> Result<LoadedImage, String> {
    let name = file.name();
    let url = Url::create_object_url_with_blob(&file)
        .map_err(|e| format!("failed to read {name}: {e:?}"))?;
    let img = HtmlImageElement::new().map_err(|e| format!("failed to create image: {e:?}"))?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
    });
    img.set_src(&url);

    let result = wasm_bindgen_futures::JsFuture::from(promise).await;
    let _ = Url::revoke_object_url(&url);
    img.set_onload(None);
    img.set_onerror(None);
    result.map_err(|_| format!("{name} is not a decodable image"))?;

    let (width, height) = (img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        return Err(format!("{name} decoded to an empty image"));
    }
    log::info!("loaded {name} ({width}x{height})");
    Ok(LoadedImage {
        element: img,
        width,
        height,
        name,
    })
}
