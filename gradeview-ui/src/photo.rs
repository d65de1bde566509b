//! Profile photo preview bindings
//!
//! Adapts `<input type="file">`, `File` and `<img>` to the previewer seams.

use async_trait::async_trait;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FileReader, HtmlImageElement, HtmlInputElement};

use gradeview::photo::{FileInput, PhotoError, PhotoFile, PhotoResult, PreviewTarget};

/// A file picked through a file input
pub struct BrowserFile {
    file: File,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    fn read_error(&self, err: &JsValue) -> PhotoError {
        PhotoError::Read {
            name: self.file.name(),
            message: format!("{:?}", err),
        }
    }
}

#[async_trait(?Send)]
impl PhotoFile for BrowserFile {
    fn name(&self) -> String {
        self.file.name()
    }

    fn mime_type(&self) -> String {
        self.file.type_()
    }

    fn size(&self) -> Option<u64> {
        Some(self.file.size() as u64)
    }

    async fn read(&self) -> PhotoResult<Vec<u8>> {
        let reader = FileReader::new().map_err(|e| self.read_error(&e))?;

        let loaded = js_sys::Promise::new(&mut |resolve, reject| {
            let onload = {
                let reader = reader.clone();
                Closure::once_into_js(move |_: Event| {
                    let result = reader.result().unwrap_or(JsValue::NULL);
                    let _ = resolve.call1(&JsValue::NULL, &result);
                })
            };
            let onerror = {
                let reader = reader.clone();
                Closure::once_into_js(move |_: Event| {
                    let error = reader.error().map(JsValue::from).unwrap_or(JsValue::NULL);
                    let _ = reject.call1(&JsValue::NULL, &error);
                })
            };

            reader.set_onload(Some(onload.unchecked_ref()));
            reader.set_onerror(Some(onerror.unchecked_ref()));
        });

        reader
            .read_as_array_buffer(&self.file)
            .map_err(|e| self.read_error(&e))?;

        let buffer = JsFuture::from(loaded)
            .await
            .map_err(|e| self.read_error(&e))?
            .dyn_into::<js_sys::ArrayBuffer>()
            .map_err(|e| self.read_error(&e))?;

        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

/// The file input element whose selection is previewed
pub struct InputSelection {
    input: HtmlInputElement,
}

impl InputSelection {
    pub fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl FileInput for InputSelection {
    type File = BrowserFile;

    fn first_file(&self) -> Option<BrowserFile> {
        self.input.files()?.get(0).map(BrowserFile::new)
    }
}

/// The `<img>` preview element
pub struct ImagePreview {
    image: HtmlImageElement,
}

impl ImagePreview {
    pub fn new(image: HtmlImageElement) -> Self {
        Self { image }
    }

    pub fn element(&self) -> &HtmlImageElement {
        &self.image
    }
}

impl PreviewTarget for ImagePreview {
    fn set_source(&self, src: &str) {
        self.image.set_src(src);
    }

    fn show(&self) {
        if let Err(e) = self.image.style().set_property("display", "block") {
            web_sys::console::debug_2(&"Preview image could not be shown:".into(), &e);
        }
    }
}
