//! Hand-built `multipart/form-data` bodies for delivery uploads.

pub const BOUNDARY: &str = "courier-test-boundary";

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl std::fmt::Display) -> Self {
        self.buf.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Body of a complete delivery with the photo in `file`.
pub fn delivery_body(
    package_id: i32,
    agent_id: i32,
    lat: f64,
    lon: f64,
    filename: &str,
    photo: &[u8],
) -> Vec<u8> {
    MultipartBody::new()
        .text("paquete_id", package_id)
        .text("agente_id", agent_id)
        .text("lat", lat)
        .text("lon", lon)
        .file("file", filename, photo)
        .finish()
}
