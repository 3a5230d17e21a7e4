//! The ticket QR code is drawn by an external image service; this module only
//! builds the request URL, and on demand downloads or opens the image.

use bytes::Bytes;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{info, warn};

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::Result;
use crate::schema::{QR_IMAGE_SIZE, QR_SERVICE_URL};

pub fn qr_image_url(qr_data: &str) -> String {
    let payload = vec![("size", QR_IMAGE_SIZE), ("data", qr_data)];
    // Encoding `&str` pairs cannot fail.
    let query = serde_urlencoded::to_string(&payload).unwrap_or_default();
    format!("{QR_SERVICE_URL}?{query}")
}

fn get_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(concat!("busticket/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert("Accept", HeaderValue::from_static("image/png,image/*;q=0.8"));
    headers
}

pub fn client() -> Result<Client> {
    let client = Client::builder()
        .default_headers(get_header())
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    Ok(client)
}

pub fn fetch_qr_image(client: &Client, qr_data: &str) -> Result<Bytes> {
    let url = qr_image_url(qr_data);
    info!(%url, "requesting QR image");
    let resp = client.get(&url).send()?.error_for_status()?;
    Ok(resp.bytes()?)
}

pub fn save_qr_image(client: &Client, qr_data: &str, path: &Path) -> Result<()> {
    let img = fetch_qr_image(client, qr_data)?;
    fs::write(path, &img)?;
    info!(path = %path.display(), bytes = img.len(), "QR image saved");
    Ok(())
}

fn viewer_command(path: &Path) -> Option<Command> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "linux") {
        Command::new("xdg-open")
    } else {
        return None;
    };
    cmd.arg(path);
    Some(cmd)
}

/// Open an image with the platform's default viewer.
///
/// The launchers hand the file off and return, so the child is waited on.
pub fn show_image(path: &Path) -> Result<()> {
    match viewer_command(path) {
        Some(mut cmd) => {
            let status = cmd.status()?;
            if !status.success() {
                warn!(%status, path = %path.display(), "image viewer exited with failure");
            }
        }
        None => println!("Please open the image manually: {}", path.display()),
    }
    Ok(())
}
