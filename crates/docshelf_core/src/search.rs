//! Search, ranking, and category grouping over catalog documents.
//!
//! Everything here is a pure function of its inputs: ranking produces a
//! presentational view and never reorders the catalog itself, and category
//! grouping is recomputed per call rather than stored on the record.

use std::collections::BTreeMap;

use crate::models::Document;

/// A document paired with its relevance score for the active query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    pub doc: Document,
    pub score: u32,
}

/// Rank documents against a query by filename relevance.
///
/// An empty (or whitespace-only) query returns every document unscored in
/// catalog order. Otherwise each lowercased name scores:
/// - `min(query chars, 10)` for containing the whole query,
/// - `+5` for starting with it,
/// - `min(token chars, 8)` per query token (length > 1) it contains,
///   additively on top of the whole-query bonuses.
///
/// Zero-score documents are filtered out; the rest sort by descending score,
/// ties broken by ascending name.
pub fn rank(query: &str, docs: &[Document]) -> Vec<Ranked> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return docs
            .iter()
            .map(|doc| Ranked {
                doc: doc.clone(),
                score: 0,
            })
            .collect();
    }

    let tokens: Vec<&str> = q.split_whitespace().filter(|t| t.chars().count() > 1).collect();
    let mut ranked: Vec<Ranked> = docs
        .iter()
        .filter_map(|doc| {
            let name = doc.name.to_lowercase();
            let mut score = 0u32;
            if name.contains(&q) {
                score += q.chars().count().min(10) as u32;
            }
            if name.starts_with(&q) {
                score += 5;
            }
            for token in &tokens {
                if name.contains(token) {
                    score += token.chars().count().min(8) as u32;
                }
            }
            (score > 0).then(|| Ranked {
                doc: doc.clone(),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.doc.name.cmp(&b.doc.name))
    });
    ranked
}

/// Listing category for a document. Variants are declared in the alphabetical
/// order of their labels so the derived ordering matches display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Archives,
    Audio,
    Code,
    ExcelCsv,
    Images,
    Other,
    Pdf,
    Slides,
    Text,
    Videos,
    Word,
}

impl Category {
    /// Display label for the category group header.
    pub fn label(self) -> &'static str {
        match self {
            Category::Archives => "Archives",
            Category::Audio => "Audio",
            Category::Code => "Code",
            Category::ExcelCsv => "Excel & CSV",
            Category::Images => "Images",
            Category::Other => "Other",
            Category::Pdf => "PDF",
            Category::Slides => "Slides",
            Category::Text => "Text",
            Category::Videos => "Videos",
            Category::Word => "Word",
        }
    }
}

const WORD_EXTS: &[&str] = &["doc", "docx", "rtf"];
const EXCEL_EXTS: &[&str] = &["xls", "xlsx", "csv"];
const SLIDE_EXTS: &[&str] = &["ppt", "pptx", "key"];
const ARCHIVE_EXTS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
const TEXT_EXTS: &[&str] = &["txt", "md", "log"];
const CODE_EXTS: &[&str] = &[
    "htm", "html", "css", "js", "ts", "json", "yml", "xml", "py", "java", "c", "cpp", "cs", "rb",
    "go",
];

fn extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Classify a document into exactly one category, MIME type first, filename
/// extension second. Unmatched documents land in [`Category::Other`].
pub fn classify(doc: &Document) -> Category {
    let mime = doc.mime.to_lowercase();
    let ext = extension(&doc.name);

    if mime.starts_with("image/") {
        return Category::Images;
    }
    if mime.starts_with("video/") {
        return Category::Videos;
    }
    if mime.starts_with("audio/") {
        return Category::Audio;
    }
    if mime.contains("pdf") || ext == "pdf" {
        return Category::Pdf;
    }
    if WORD_EXTS.contains(&ext.as_str()) {
        return Category::Word;
    }
    if EXCEL_EXTS.contains(&ext.as_str()) {
        return Category::ExcelCsv;
    }
    if SLIDE_EXTS.contains(&ext.as_str()) {
        return Category::Slides;
    }
    if ARCHIVE_EXTS.contains(&ext.as_str()) {
        return Category::Archives;
    }
    if TEXT_EXTS.contains(&ext.as_str()) {
        return Category::Text;
    }
    if CODE_EXTS.contains(&ext.as_str()) {
        return Category::Code;
    }
    Category::Other
}

/// Bucket documents by category, groups sorted alphabetically by label.
/// Within a group, documents keep their relative catalog order.
pub fn group(docs: &[Document]) -> Vec<(Category, Vec<&Document>)> {
    let mut buckets: BTreeMap<Category, Vec<&Document>> = BTreeMap::new();
    for doc in docs {
        buckets.entry(classify(doc)).or_default().push(doc);
    }
    buckets.into_iter().collect()
}

/// Best catalog match for a blob of extracted text (e.g. from an external
/// text-recognition service run over a scanned image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub id: String,
    pub name: String,
    pub score: u32,
}

const TEXT_MATCH_THRESHOLD: u32 = 5;

/// Match extracted text against document names.
///
/// Name tokens (alphanumeric runs longer than two characters) found in the
/// lowercased text each add their length to that document's score. The
/// highest-scoring document wins if it reaches the threshold.
///
/// # Returns
/// The best match scoring at least 5, otherwise `None`.
pub fn match_extracted_text(text: &str, docs: &[Document]) -> Option<TextMatch> {
    let blob = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if blob.is_empty() {
        return None;
    }

    let mut best: Option<TextMatch> = None;
    for doc in docs {
        let base = doc.name.to_lowercase();
        let mut score = 0u32;
        for token in base
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| t.chars().count() > 2)
        {
            if blob.contains(token) {
                score += token.chars().count() as u32;
            }
        }
        if score > best.as_ref().map_or(0, |m| m.score) {
            best = Some(TextMatch {
                id: doc.id.clone(),
                name: doc.name.clone(),
                score,
            });
        }
    }

    best.filter(|m| m.score >= TEXT_MATCH_THRESHOLD)
}
