//! File operations for exporting, importing, and loading background images.
//!
//! This module handles all file I/O including native file dialogs and
//! WASM-compatible browser downloads and file pickers.

use super::state::{DotsApp, FileOperationResult, PendingFileOperation};
use crate::background::decode_image;
use crate::constants;
use eframe::egui;

impl DotsApp {
    /// Handles pending file operations for both native and WASM platforms.
    ///
    /// Completed async operations are applied first, then any operation the
    /// toolbar requested this frame is started.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints and uploading textures
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        let mut completed = Vec::new();
        if let Some(receiver) = &self.file.receiver {
            while let Ok(result) = receiver.try_recv() {
                completed.push(result);
            }
        }
        for result in completed {
            self.apply_file_result(ctx, result);
        }

        if let Some(op) = self.file.pending.take() {
            self.start_file_operation(ctx, op);
        }
    }

    /// Applies the result of a finished file operation.
    pub fn apply_file_result(&mut self, ctx: &egui::Context, result: FileOperationResult) {
        match result {
            FileOperationResult::Saved(path) => {
                log::info!("Saved {path}");
                self.status = Some(format!("Saved {path}"));
            }
            FileOperationResult::JsonLoaded(name, content) => {
                match self.workspace.import_json(&content) {
                    Ok(count) => {
                        self.controller.reset();
                        self.status = Some(format!("Imported {count} point(s) from {name}"));
                    }
                    Err(e) => {
                        log::error!("Failed to import {name}: {e}");
                        self.status = Some(format!("Failed to import {name}: {e}"));
                    }
                }
            }
            FileOperationResult::ImageLoaded(name, bytes) => match decode_image(&bytes) {
                Ok(decoded) => {
                    let size = [decoded.width as usize, decoded.height as usize];
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, &decoded.rgba);
                    self.background_texture = Some(ctx.load_texture(
                        "background",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                    self.workspace.set_background(decoded.width, decoded.height);
                    self.status = Some(format!("Loaded background {name}"));
                }
                Err(e) => {
                    log::error!("Failed to load image {name}: {e}");
                    self.status = Some(format!("Failed to load image {name}: {e}"));
                }
            },
            FileOperationResult::OperationFailed(error) => {
                log::error!("File operation failed: {error}");
                self.status = Some(error);
            }
        }
    }

    fn start_file_operation(&mut self, ctx: &egui::Context, op: PendingFileOperation) {
        match op {
            PendingFileOperation::ExportJson => match self.workspace.export_json() {
                Ok(json) => {
                    self.json_output = json.clone();
                    self.save_text(ctx, constants::JSON_FILE_NAME, "JSON", "json", "text/json", json);
                }
                Err(e) => {
                    log::error!("Failed to serialize points: {e}");
                    self.status = Some(format!("Failed to serialize points: {e}"));
                }
            },
            PendingFileOperation::ExportSvg => {
                let svg = self.workspace.export_svg();
                self.save_text(ctx, constants::SVG_FILE_NAME, "SVG", "svg", "image/svg+xml", svg);
            }
            PendingFileOperation::ExportPng => self.save_png(ctx),
            PendingFileOperation::ImportJson => self.pick_file(ctx, "JSON", &["json"], false),
            PendingFileOperation::LoadImage => self.pick_file(
                ctx,
                "Images",
                &["png", "jpg", "jpeg", "gif", "bmp", "webp"],
                true,
            ),
        }
    }

    /// Writes a text artifact: save dialog on native, browser download on wasm.
    fn save_text(
        &mut self,
        ctx: &egui::Context,
        file_name: &'static str,
        filter_name: &'static str,
        extension: &'static str,
        mime: &'static str,
        content: String,
    ) {
        let sender = self.file.sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            let _ = (filter_name, extension);
            let result = match Self::trigger_download(file_name, mime, content.as_bytes()) {
                Ok(()) => FileOperationResult::Saved(file_name.to_string()),
                Err(e) => FileOperationResult::OperationFailed(e),
            };
            if let Some(tx) = sender {
                let _ = tx.send(result);
            }
            ctx.request_repaint();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = mime;
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter(filter_name, &[extension])
                    .set_file_name(file_name)
                    .save_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::write(path, content.as_bytes()) {
                        Ok(_) => FileOperationResult::Saved(path.display().to_string()),
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to save file: {e}"
                        )),
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Rasterizes the SVG export and saves it (native builds only).
    fn save_png(&mut self, ctx: &egui::Context) {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = ctx;
            log::warn!("PNG export is not available in the browser");
            self.status = Some("PNG export is only available in the desktop build".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let png = match crate::export::render_png(&self.workspace.export_svg(), 1.0) {
                Ok(png) => png,
                Err(e) => {
                    log::error!("Failed to render PNG: {e}");
                    self.status = Some(format!("Failed to render PNG: {e}"));
                    return;
                }
            };
            let sender = self.file.sender.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("PNG", &["png"])
                    .set_file_name(constants::PNG_FILE_NAME)
                    .save_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::write(path, &png) {
                        Ok(_) => FileOperationResult::Saved(path.display().to_string()),
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to save PNG: {e}"
                        )),
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Opens a file picker and sends the chosen file's content back.
    ///
    /// Images come back as raw bytes, everything else as text.
    fn pick_file(
        &mut self,
        ctx: &egui::Context,
        filter_name: &'static str,
        extensions: &'static [&'static str],
        binary: bool,
    ) {
        let ctx = ctx.clone();
        let sender = self.file.sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            let _ = filter_name;
            let accept = extensions
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(",");
            wasm_bindgen_futures::spawn_local(async move {
                match Self::show_open_file_picker(&accept).await {
                    Some(file) => {
                        let name = file.name();
                        let result = if binary {
                            match Self::read_file_bytes(file).await {
                                Ok(bytes) => FileOperationResult::ImageLoaded(name, bytes),
                                Err(e) => FileOperationResult::OperationFailed(e),
                            }
                        } else {
                            match Self::read_file(file).await {
                                Ok(content) => FileOperationResult::JsonLoaded(name, content),
                                Err(e) => FileOperationResult::OperationFailed(e),
                            }
                        };
                        if let Some(tx) = sender {
                            let _ = tx.send(result);
                        }
                    }
                    None => {
                        log::info!("Open dialog cancelled or API not supported");
                    }
                }
                ctx.request_repaint();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter(filter_name, extensions)
                    .pick_file()
                    .await
                {
                    let path = handle.path();
                    let name = path.display().to_string();
                    let result = if binary {
                        match std::fs::read(path) {
                            Ok(bytes) => FileOperationResult::ImageLoaded(name, bytes),
                            Err(e) => FileOperationResult::OperationFailed(format!(
                                "Failed to read file: {e}"
                            )),
                        }
                    } else {
                        match std::fs::read_to_string(path) {
                            Ok(json) => FileOperationResult::JsonLoaded(name, json),
                            Err(e) => FileOperationResult::OperationFailed(format!(
                                "Failed to read file: {e}"
                            )),
                        }
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Triggers a file download in the browser (WASM only, Firefox-compatible).
    ///
    /// Creates a temporary anchor element with a blob URL and clicks it.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, mime: &str, content: &[u8]) -> Result<(), String> {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&js_sys::Uint8Array::from(content));

        let blob_options = web_sys::BlobPropertyBag::new();
        blob_options.set_type(mime);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &blob_options)
            .map_err(|_| "Failed to create blob")?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;

        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or("No body found")?;
        body.append_child(&anchor)
            .map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;

        Ok(())
    }

    /// Opens a file picker in the browser and waits for a selection (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn show_open_file_picker(accept: &str) -> Option<web_sys::File> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let window = web_sys::window()?;
        let document = window.document()?;

        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;

        input.set_type("file");
        input.set_accept(accept);
        input.style().set_property("display", "none").ok()?;

        let (sender, receiver) = futures::channel::oneshot::channel::<Option<web_sys::File>>();
        let sender = std::rc::Rc::new(std::cell::RefCell::new(Some(sender)));

        let onchange = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let input = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());

            if let Some(input) = input {
                let file = input.files().and_then(|files| files.get(0));
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(file);
                }
            }
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        document.body()?.append_child(&input).ok()?;
        input.click();

        let file = receiver.await.ok()??;

        document.body()?.remove_child(&input).ok()?;

        Some(file)
    }

    /// Reads a picked file as text (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_file(file: web_sys::File) -> Result<String, String> {
        let result = Self::read_with(file, |reader, file| reader.read_as_text(file)).await?;
        result
            .as_string()
            .ok_or_else(|| "File content is not a string".to_string())
    }

    /// Reads a picked file as raw bytes (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_file_bytes(file: web_sys::File) -> Result<Vec<u8>, String> {
        let result =
            Self::read_with(file, |reader, file| reader.read_as_array_buffer(file)).await?;
        Ok(js_sys::Uint8Array::new(&result).to_vec())
    }

    /// Drives a `FileReader` to completion using the given read call (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_with(
        file: web_sys::File,
        start: impl FnOnce(&web_sys::FileReader, &web_sys::File) -> Result<(), wasm_bindgen::JsValue>,
    ) -> Result<wasm_bindgen::JsValue, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::JsValue;

        let file_reader =
            web_sys::FileReader::new().map_err(|_| "Failed to create FileReader".to_string())?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let reader = file_reader.clone();

            let onload = wasm_bindgen::closure::Closure::wrap(Box::new(
                move |_event: web_sys::ProgressEvent| {
                    if let Ok(result) = reader.result() {
                        let _ = resolve.call1(&JsValue::NULL, &result);
                    }
                },
            ) as Box<dyn FnMut(_)>);
            file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = wasm_bindgen::closure::Closure::wrap(Box::new(
                move |_event: web_sys::ProgressEvent| {
                    let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
                },
            ) as Box<dyn FnMut(_)>);
            file_reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });

        start(&file_reader, &file).map_err(|_| "Failed to start reading file".to_string())?;

        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Failed to read file: {:?}", e))
    }

    /// Requests a JSON export of all points.
    pub fn export_json(&mut self) {
        self.file.pending = Some(PendingFileOperation::ExportJson);
    }

    /// Requests an SVG export of all points.
    pub fn export_svg(&mut self) {
        self.file.pending = Some(PendingFileOperation::ExportSvg);
    }

    /// Requests a PNG export of all points.
    pub fn export_png(&mut self) {
        self.file.pending = Some(PendingFileOperation::ExportPng);
    }

    /// Requests a JSON import that replaces all points.
    pub fn import_json(&mut self) {
        self.file.pending = Some(PendingFileOperation::ImportJson);
    }

    /// Requests a background image.
    pub fn load_background_image(&mut self) {
        self.file.pending = Some(PendingFileOperation::LoadImage);
    }
}
