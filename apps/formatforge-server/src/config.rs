//! Configuration management for FormatForge Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::imaging::CanvasSize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub conversion: ConversionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies (base64 payloads and uploads)
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Page canvas in pixels (A4 at 300 DPI by default)
    pub canvas: CanvasSize,
    /// Resolution the canvas is rendered at, used for the PDF page size
    pub canvas_dpi: u32,
    /// JPEG quality of the page images embedded in generated PDFs
    pub page_quality: u8,
    /// JPEG quality used by `/compress` for images
    pub jpeg_quality: u8,
    /// Most images accepted by one `/convert` request
    pub max_pages: usize,
    /// Program invoked as `<program> convert <input.pdf> <output.docx>`
    pub docx_command: String,
    /// Root for per-request scratch directories
    pub temp_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_body_bytes: 50 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: "sqlite:./formatforge.db".to_string(),
                max_connections: 5,
            },
            conversion: ConversionConfig::default(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            canvas: CanvasSize::A4_300_DPI,
            canvas_dpi: 300,
            page_quality: 90,
            jpeg_quality: 60,
            max_pages: 50,
            docx_command: "pdf2docx".to_string(),
            temp_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let canvas = CanvasSize::new(
            parse_var("FORMATFORGE_CANVAS_WIDTH", defaults.conversion.canvas.width)?,
            parse_var("FORMATFORGE_CANVAS_HEIGHT", defaults.conversion.canvas.height)?,
        )?;

        let canvas_dpi: u32 = parse_var("FORMATFORGE_CANVAS_DPI", defaults.conversion.canvas_dpi)?;
        if canvas_dpi == 0 {
            return Err(AppError::Config("FORMATFORGE_CANVAS_DPI must be positive".to_string()));
        }

        let max_pages: usize = parse_var("FORMATFORGE_MAX_PAGES", defaults.conversion.max_pages)?;
        if max_pages == 0 {
            return Err(AppError::Config("FORMATFORGE_MAX_PAGES must be positive".to_string()));
        }

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
                max_body_bytes: parse_var("FORMATFORGE_MAX_BODY_BYTES", defaults.server.max_body_bytes)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.database.max_connections)?,
            },
            conversion: ConversionConfig {
                canvas,
                canvas_dpi,
                page_quality: parse_quality("FORMATFORGE_PAGE_QUALITY", defaults.conversion.page_quality)?,
                jpeg_quality: parse_quality("FORMATFORGE_JPEG_QUALITY", defaults.conversion.jpeg_quality)?,
                max_pages,
                docx_command: env::var("FORMATFORGE_DOCX_COMMAND").unwrap_or(defaults.conversion.docx_command),
                temp_dir: env::var("FORMATFORGE_TEMP_DIR").ok().map(PathBuf::from),
            },
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

fn parse_quality(name: &str, default: u8) -> Result<u8> {
    let quality: u8 = parse_var(name, default)?;
    if !(1..=100).contains(&quality) {
        return Err(AppError::Config(format!("{} must be between 1 and 100", name)));
    }
    Ok(quality)
}
