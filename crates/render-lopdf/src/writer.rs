use lopdf::content::Content;
use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use replica_render_core::RenderError;
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes a PDF incrementally. Page content and page objects go to the
/// underlying writer as soon as they are produced; the shared resources,
/// page tree and catalog are buffered until `finish`, when every page is known.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info: Option<Dictionary>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n%âãÏÓ\n", version).as_bytes())?;

        let resources_id = (1, 0);
        let pages_id = (2, 0);
        let catalog_id = (3, 0);

        let mut buffered_objects = BTreeMap::new();
        buffered_objects.insert(resources_id, Object::Dictionary(Dictionary::new()));

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 3,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            info: None,
            buffered_objects,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Replaces the shared resource dictionary every page without its own
    /// `Resources` entry points at.
    pub fn set_shared_resources(&mut self, resources: Dictionary) {
        self.buffered_objects
            .insert(self.resources_id, Object::Dictionary(resources));
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        let id = self.new_object_id();
        self.buffered_objects.insert(id, object);
        id
    }

    /// Writes an object to the output immediately.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        encode::indirect_object(&mut self.writer, id, &object, &mut self.xref)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let bytes = content
            .encode()
            .map_err(|e| RenderError::Pdf(format!("Failed to encode content stream: {}", e)))?;
        Ok(self.write_object(Object::Stream(Stream::new(dictionary! {}, bytes)))?)
    }

    /// Writes a page object and appends it to the page tree. Pages without
    /// their own resources use the shared dictionary.
    pub fn write_page(
        &mut self,
        content_ids: Vec<ObjectId>,
        width: f32,
        height: f32,
        resources: Option<Dictionary>,
    ) -> io::Result<ObjectId> {
        let resources = match resources {
            Some(dict) => Object::Dictionary(dict),
            None => Object::Reference(self.resources_id),
        };
        let media_box = vec![Object::Integer(0), Object::Integer(0), Object::Real(width), Object::Real(height)];
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_ids.into_iter().map(Object::Reference).collect::<Vec<Object>>(),
            "Resources" => resources,
        };
        let id = self.write_object(page.into())?;
        self.page_ids.push(id);
        Ok(id)
    }

    pub fn finish(mut self) -> io::Result<W> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffered_objects.insert(self.pages_id, pages_dict.into());
        self.buffered_objects.insert(
            self.catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => self.pages_id }.into(),
        );
        let info_id = self.info.take().map(|info| self.buffer_object(info.into()));

        for (id, object) in &self.buffered_objects {
            encode::indirect_object(&mut self.writer, *id, object, &mut self.xref)?;
        }

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        self.writer.write_all(&encode::xref_table(&self.xref))?;

        let mut trailer = dictionary! { "Size" => self.xref.size as i64, "Root" => self.catalog_id };
        if let Some(id) = info_id {
            trailer.set("Info", id);
        }
        self.writer.write_all(b"trailer\n")?;
        self.writer.write_all(&encode::dictionary_bytes(&trailer))?;
        write!(self.writer, "\nstartxref\n{}\n%%EOF", xref_start)?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Byte-level PDF syntax for the objects a statement document uses.
///
/// Each indirect object is encoded into a buffer first and written with one
/// call, so its xref offset is the stream position before that write.
mod encode {
    use super::*;
    use lopdf::StringFormat;

    pub fn indirect_object<W: Write + Seek>(
        writer: &mut W,
        id: ObjectId,
        object: &Object,
        xref: &mut Xref,
    ) -> io::Result<()> {
        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        object_into(&mut buf, object);
        buf.extend_from_slice(b"\nendobj\n");

        let offset = writer.stream_position()?;
        xref.insert(id.0, XrefEntry::Normal { offset: offset as u32, generation: id.1 });
        writer.write_all(&buf)
    }

    pub fn dictionary_bytes(dict: &Dictionary) -> Vec<u8> {
        let mut buf = Vec::new();
        dictionary_into(&mut buf, dict);
        buf
    }

    fn object_into(buf: &mut Vec<u8>, object: &Object) {
        match object {
            Object::Null => buf.extend_from_slice(b"null"),
            Object::Boolean(b) => buf.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => buf.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => real_into(buf, *r),
            Object::Name(name) => name_into(buf, name),
            Object::String(bytes, StringFormat::Literal) => {
                buf.push(b'(');
                for &b in bytes {
                    match b {
                        b'(' | b')' | b'\\' => buf.extend_from_slice(&[b'\\', b]),
                        b'\r' => buf.extend_from_slice(b"\\r"),
                        _ => buf.push(b),
                    }
                }
                buf.push(b')');
            }
            Object::String(bytes, StringFormat::Hexadecimal) => {
                buf.push(b'<');
                for b in bytes {
                    let _ = write!(buf, "{:02X}", b);
                }
                buf.push(b'>');
            }
            Object::Array(items) => {
                buf.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        buf.push(b' ');
                    }
                    object_into(buf, item);
                }
                buf.push(b']');
            }
            Object::Dictionary(dict) => dictionary_into(buf, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                dictionary_into(buf, &dict);
                buf.extend_from_slice(b"\nstream\n");
                buf.extend_from_slice(&stream.content);
                buf.extend_from_slice(b"\nendstream");
            }
            Object::Reference(id) => {
                let _ = write!(buf, "{} {} R", id.0, id.1);
            }
        }
    }

    /// Keys are emitted in byte order so output does not depend on insertion order.
    fn dictionary_into(buf: &mut Vec<u8>, dict: &Dictionary) {
        let mut entries: Vec<_> = dict.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        buf.extend_from_slice(b"<<");
        for (key, value) in entries {
            name_into(buf, key);
            buf.push(b' ');
            object_into(buf, value);
            buf.push(b' ');
        }
        buf.extend_from_slice(b">>");
    }

    /// Delimiters, whitespace, `#` and non-printable bytes are written as `#XX`.
    fn name_into(buf: &mut Vec<u8>, name: &[u8]) {
        buf.push(b'/');
        for &b in name {
            if b.is_ascii_graphic() && !b"()<>[]{}/%#".contains(&b) {
                buf.push(b);
            } else {
                let _ = write!(buf, "#{:02X}", b);
            }
        }
    }

    /// Reals with at most three decimals and no trailing zeros (`612`, `0.5`).
    fn real_into(buf: &mut Vec<u8>, value: f32) {
        let value = if value.is_finite() { value } else { 0.0 };
        let text = format!("{:.3}", value);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        buf.extend_from_slice(if text == "-0" { "0" } else { text }.as_bytes());
    }

    /// One subsection covering every id up to `xref.size`; ids that were
    /// allocated but never written are listed as free.
    pub fn xref_table(xref: &Xref) -> Vec<u8> {
        let mut out = format!("xref\n0 {}\n0000000000 65535 f \n", xref.size);
        for id in 1..xref.size {
            match xref.entries.get(&id) {
                Some(XrefEntry::Normal { offset, generation }) => {
                    out.push_str(&format!("{:010} {:05} n \n", offset, generation))
                }
                _ => out.push_str("0000000000 00000 f \n"),
            }
        }
        out.into_bytes()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn encoded(object: Object) -> String {
            let mut buf = Vec::new();
            object_into(&mut buf, &object);
            String::from_utf8(buf).unwrap()
        }

        #[test]
        fn reals_are_compact() {
            assert_eq!(encoded(Object::Real(612.0)), "612");
            assert_eq!(encoded(Object::Real(0.5)), "0.5");
            assert_eq!(encoded(Object::Real(-0.0001)), "0");
            assert_eq!(encoded(Object::Real(1.23456)), "1.235");
        }

        #[test]
        fn names_and_strings_are_escaped() {
            assert_eq!(encoded(Object::Name(b"A B#".to_vec())), "/A#20B#23");
            assert_eq!(encoded(Object::string_literal("a(b)\\")), "(a\\(b\\)\\\\)");
        }

        #[test]
        fn dictionary_keys_are_sorted() {
            let dict = dictionary! { "Type" => "Page", "Count" => 2_i64 };
            assert_eq!(String::from_utf8(dictionary_bytes(&dict)).unwrap(), "<</Count 2 /Type /Page >>");
        }
    }
}
