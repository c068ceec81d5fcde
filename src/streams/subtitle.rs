//! OCR language selection for image subtitles

/// Maps Matroska language tags (ISO 639-2) onto Tesseract language packs
#[derive(Debug, Clone)]
pub struct OcrLanguageMapper {
    fallback: String,
}

impl OcrLanguageMapper {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    /// Tesseract language for a track tagged `language`.
    ///
    /// Bibliographic codes are folded onto the terminology codes Tesseract
    /// ships; untagged or unknown tracks get the fallback.
    pub fn tesseract_language(&self, language: &str) -> String {
        let tag = language.to_ascii_lowercase();
        let mapped = match tag.as_str() {
            "und" | "zxx" | "mis" | "mul" | "" => None,
            "fre" => Some("fra"),
            "ger" => Some("deu"),
            "dut" => Some("nld"),
            "chi" => Some("chi_sim"),
            "cze" => Some("ces"),
            "gre" => Some("ell"),
            "per" => Some("fas"),
            "rum" => Some("ron"),
            "slo" => Some("slk"),
            tag if tag.len() == 3 && tag.chars().all(|c| c.is_ascii_lowercase()) => Some(tag),
            _ => None,
        };

        mapped
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_terminology_codes() {
        let mapper = OcrLanguageMapper::new("eng");
        assert_eq!(mapper.tesseract_language("eng"), "eng");
        assert_eq!(mapper.tesseract_language("jpn"), "jpn");
        assert_eq!(mapper.tesseract_language("SPA"), "spa");
    }

    #[test]
    fn test_folds_bibliographic_codes() {
        let mapper = OcrLanguageMapper::new("eng");
        assert_eq!(mapper.tesseract_language("ger"), "deu");
        assert_eq!(mapper.tesseract_language("fre"), "fra");
    }

    #[test]
    fn test_fallback_for_undetermined() {
        let mapper = OcrLanguageMapper::new("eng");
        assert_eq!(mapper.tesseract_language("und"), "eng");
        assert_eq!(mapper.tesseract_language("en-US"), "eng");
    }
}
