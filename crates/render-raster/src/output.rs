use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use replica_render_core::RenderError;
use replica_render_lopdf::StreamingPdfWriter;
use replica_types::Size;
use std::io::Cursor;
use tiny_skia::Pixmap;

pub(crate) fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    let mut writer = enc
        .write_header()
        .map_err(|e| RenderError::Encoding(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| RenderError::Encoding(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| RenderError::Encoding(e.to_string()))?;
    Ok(out)
}

/// Pages are opaque, so dropping alpha from the premultiplied data is exact.
fn rgb_bytes(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Packages rendered pages as a PDF with one full-page image per page.
pub(crate) fn image_pdf(pages: &[Pixmap], page_size: Size) -> Result<Vec<u8>, RenderError> {
    let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7")?;

    for pixmap in pages {
        let data = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_bytes(pixmap), 6);
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => pixmap.width() as i64,
                "Height" => pixmap.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "FlateDecode",
            },
            data,
        );
        let image_id = writer.write_object(Object::Stream(image))?;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page_size.width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(page_size.height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = writer.write_content_stream(content)?;
        let resources = dictionary! { "XObject" => dictionary! { "Im0" => image_id } };
        writer.write_page(vec![content_id], page_size.width, page_size.height, Some(resources))?;
    }

    writer.set_info(dictionary! {
        "Producer" => Object::string_literal(concat!("replica ", env!("CARGO_PKG_VERSION"))),
    });
    let bytes = writer.finish()?.into_inner();
    log::info!("Finished image PDF with {} pages ({} bytes)", pages.len(), bytes.len());
    Ok(bytes)
}
