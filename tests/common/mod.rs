pub mod fixtures;

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Strings shown with `Tj` on a 1-based page, decoded from WinAnsi, in
    /// drawing order, paired with their `Td` position.
    pub fn page_texts(&self, page: u32) -> Vec<(f32, f32, String)> {
        let Some(&id) = self.doc.get_pages().get(&page) else { return Vec::new() };
        let Ok(raw) = self.doc.get_page_content(id) else { return Vec::new() };
        let Ok(content) = Content::decode(&raw) else { return Vec::new() };

        let mut texts = Vec::new();
        let mut pos = (0.0, 0.0);
        for op in content.operations {
            match op.operator.as_str() {
                "Td" if op.operands.len() == 2 => {
                    pos = (
                        op.operands[0].as_float().unwrap_or(0.0),
                        op.operands[1].as_float().unwrap_or(0.0),
                    );
                }
                "Tj" => {
                    if let Some(Ok(bytes)) = op.operands.first().map(|o| o.as_str()) {
                        let text: String = bytes.iter().map(|&b| b as char).collect();
                        texts.push((pos.0, pos.1, text));
                    }
                }
                _ => {}
            }
        }
        texts
    }

    pub fn page_strings(&self, page: u32) -> Vec<String> {
        self.page_texts(page).into_iter().map(|(_, _, t)| t).collect()
    }

    pub fn find_text(&self, page: u32, needle: &str) -> Option<(f32, f32)> {
        self.page_texts(page)
            .into_iter()
            .find(|(_, _, t)| t == needle)
            .map(|(x, y, _)| (x, y))
    }
}
