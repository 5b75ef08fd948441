//! GENC provider backed by the GENC standard baseline XML.
//!
//! Only the parts of the baseline needed for code conversion are read: each
//! `GeopoliticalEntityEntry` contributes its `name` and the two-letter,
//! three-letter and numeric codes found under its `encoding` element. Other
//! elements are skipped.

use std::sync::Arc;

use chrono::NaiveDate;
use country_model::{ALPHA_2, ALPHA_3, CountryCode, NUMERIC, StandardInfo};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::source::SourceText;
use crate::traits::{Entries, EntryCache, Standard};

pub const NAME: &str = "GENC";
pub const VERSION: &str = "3.0.0";

const ENTRY: &[u8] = b"GeopoliticalEntityEntry";

/// Descriptor of the bundled GENC baseline.
pub fn info() -> Result<StandardInfo> {
    let published = NaiveDate::from_ymd_opt(2016, 3, 31).unwrap_or_default();
    Ok(StandardInfo::new(
        NAME,
        Some(VERSION),
        published,
        [ALPHA_2, ALPHA_3, NUMERIC],
    )?)
}

/// Geopolitical Entities, Names, and Codes.
#[derive(Debug)]
pub struct GencStandard {
    info: Arc<StandardInfo>,
    source: SourceText,
    cache: EntryCache,
}

impl GencStandard {
    pub fn embedded() -> Result<Self> {
        Self::with_source(
            info()?,
            SourceText::embedded(embedded::GENC_3_0_0_FILE, embedded::GENC_3_0_0),
        )
    }

    pub fn with_source(info: StandardInfo, source: SourceText) -> Result<Self> {
        Ok(Self {
            info: Arc::new(info),
            source,
            cache: EntryCache::default(),
        })
    }
}

impl Standard for GencStandard {
    fn info(&self) -> &Arc<StandardInfo> {
        &self.info
    }

    fn entries(&self) -> Result<Entries> {
        self.cache.get_or_load(&self.info, || {
            parse(&self.source.content, &self.source.file, &self.info)
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Alpha2,
    Alpha3,
    Numeric,
}

impl Field {
    /// Field read from the element at `path`, relative to the entry.
    ///
    /// Only the entry's own `name` and the codes directly under its
    /// `encoding` element count; names of nested elements such as
    /// `localShortName/name` do not.
    fn at(path: &[Vec<u8>]) -> Option<Self> {
        match path {
            [name] if name.as_slice() == b"name" => Some(Self::Name),
            [encoding, code] if encoding.as_slice() == b"encoding" => match code.as_slice() {
                b"char2Code" => Some(Self::Alpha2),
                b"char3Code" => Some(Self::Alpha3),
                b"numericCode" => Some(Self::Numeric),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct GencRecord {
    name: Option<String>,
    alpha2: Option<String>,
    alpha3: Option<String>,
    numeric: Option<String>,
}

impl GencRecord {
    fn set(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Alpha2 => &mut self.alpha2,
            Field::Alpha3 => &mut self.alpha3,
            Field::Numeric => &mut self.numeric,
        };
        *slot = Some(value.to_string());
    }

    fn into_code(self, info: &Arc<StandardInfo>) -> Result<CountryCode> {
        let formats = [
            (ALPHA_2, self.alpha2),
            (ALPHA_3, self.alpha3),
            (NUMERIC, self.numeric),
        ]
        .into_iter()
        .filter_map(|(format, value)| value.map(|v| (format, v)));
        Ok(CountryCode::new(
            Arc::clone(info),
            self.name.unwrap_or_default(),
            formats,
        )?)
    }
}

/// Text of a character or predefined entity reference.
fn resolve_reference(reference: &BytesRef<'_>) -> std::result::Result<String, String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|e| e.to_string())?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown entity reference &{name};"))
}

fn parse(content: &str, file: &str, info: &Arc<StandardInfo>) -> Result<Vec<CountryCode>> {
    let xml_error = |position: u64, message: String| StandardsError::Xml {
        file: file.to_string(),
        message: format!("{message} (byte {position})"),
    };

    let mut reader = Reader::from_str(content);

    let mut codes = Vec::new();
    let mut current: Option<GencRecord> = None;
    // local names of the open elements below the current entry
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut text: Option<(Field, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.error_position(), e.to_string()))?;
        match event {
            Event::Start(e) if current.is_none() => {
                if e.local_name().as_ref() == ENTRY {
                    current = Some(GencRecord::default());
                    path.clear();
                }
            }
            Event::Start(e) => {
                path.push(e.local_name().as_ref().to_vec());
                text = Field::at(&path).map(|field| (field, String::new()));
            }
            Event::Text(e) => {
                if let Some((_, value)) = text.as_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|e| xml_error(reader.buffer_position(), e.to_string()))?;
                    value.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if let Some((_, value)) = text.as_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|e| xml_error(reader.buffer_position(), e.to_string()))?;
                    value.push_str(&decoded);
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, value)) = text.as_mut() {
                    let resolved = resolve_reference(&e)
                        .map_err(|message| xml_error(reader.buffer_position(), message))?;
                    value.push_str(&resolved);
                }
            }
            Event::End(_) if current.is_some() => {
                if path.pop().is_none() {
                    if let Some(record) = current.take() {
                        codes.push(record.into_code(info)?);
                    }
                } else if let (Some((field, value)), Some(record)) = (text.take(), current.as_mut())
                {
                    record.set(field, value.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_text(xml: &str) -> Result<Entries> {
        GencStandard::with_source(info().unwrap(), SourceText::text("genc.xml", xml))
            .unwrap()
            .entries()
    }

    #[test]
    fn reads_embedded_baseline() {
        let standard = GencStandard::embedded().unwrap();
        let entries = standard.entries().unwrap();
        let gaza = entries
            .iter()
            .find(|c| c.format(ALPHA_3) == Some("XGZ"))
            .unwrap();
        assert_eq!(gaza.name(), "GAZA STRIP");
        assert_eq!(gaza.format(ALPHA_2), Some("XG"));
        assert_eq!(gaza.format(NUMERIC), None);

        let afghanistan = entries
            .iter()
            .find(|c| c.format(ALPHA_3) == Some("AFG"))
            .unwrap();
        assert_eq!(afghanistan.name(), "AFGHANISTAN");
    }

    #[test]
    fn unescapes_entity_references() {
        let xml = r#"<genc:Baseline xmlns:genc="urn:genc" xmlns:c="urn:cmn">
            <genc:GeopoliticalEntityEntry>
              <genc:encoding><c:char3Code>TTO</c:char3Code><c:char2Code>TT</c:char2Code></genc:encoding>
              <genc:name>TRINIDAD &amp; TOBAGO</genc:name>
            </genc:GeopoliticalEntityEntry>
        </genc:Baseline>"#;
        let entries = parse_text(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "TRINIDAD & TOBAGO");
        assert_eq!(entries[0].format(ALPHA_3), Some("TTO"));
    }

    #[test]
    fn reads_cdata_names() {
        let xml = r#"<genc:GeopoliticalEntityEntry xmlns:genc="urn:genc">
              <genc:name><![CDATA[AFGHANISTAN]]></genc:name>
              <genc:encoding><genc:char3Code>AFG</genc:char3Code></genc:encoding>
            </genc:GeopoliticalEntityEntry>"#;
        let entries = parse_text(xml).unwrap();
        assert_eq!(entries[0].name(), "AFGHANISTAN");
        assert_eq!(entries[0].format(ALPHA_3), Some("AFG"));
    }

    #[test]
    fn nested_names_do_not_replace_the_entry_name() {
        let xml = r#"<genc:GeopoliticalEntityEntry xmlns:genc="urn:genc">
              <genc:encoding><genc:char3Code>AFG</genc:char3Code></genc:encoding>
              <genc:name>AFGHANISTAN</genc:name>
              <genc:localShortName>
                <genc:name>Afghanestan</genc:name>
                <genc:iso6393Char3Code>prs</genc:iso6393Char3Code>
              </genc:localShortName>
              <genc:division><genc:encoding><genc:char3Code>AF-BDS</genc:char3Code></genc:encoding></genc:division>
            </genc:GeopoliticalEntityEntry>"#;
        let entries = parse_text(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "AFGHANISTAN");
        assert_eq!(entries[0].format(ALPHA_3), Some("AFG"));
    }

    #[test]
    fn character_references_are_resolved() {
        let xml = "<GeopoliticalEntityEntry><name>C&#212;TE D&apos;IVOIRE</name>\
                   <encoding><char2Code>CI</char2Code></encoding></GeopoliticalEntityEntry>";
        let entries = parse_text(xml).unwrap();
        assert_eq!(entries[0].name(), "CÔTE D'IVOIRE");
    }

    #[test]
    fn elements_outside_entries_are_ignored() {
        let xml = "<Baseline><name>not an entry</name><edition>3.0.0</edition></Baseline>";
        assert!(parse_text(xml).unwrap().is_empty());
    }

    #[test]
    fn entry_without_name_is_rejected() {
        let xml = "<GeopoliticalEntityEntry><encoding><char2Code>XX</char2Code></encoding></GeopoliticalEntityEntry>";
        assert!(matches!(parse_text(xml), Err(StandardsError::Model(_))));
    }

    #[test]
    fn mismatched_tags_are_an_xml_error() {
        let xml = "<GeopoliticalEntityEntry><name>X</nam></GeopoliticalEntityEntry>";
        assert!(matches!(
            parse_text(xml),
            Err(StandardsError::Xml { ref file, .. }) if file == "genc.xml"
        ));
    }
}
