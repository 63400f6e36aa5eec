//! Kernel ROM loader.
//!
//! The kernel ships as a flat binary plus the linker's map file. The map
//! lists segments in a fixed-column section:
//!
//! ```text
//! Segment list:
//! -------------
//! Name                   Start   End     Size    Align
//! ----------------------------------------------------
//! CODE                  00F000  00FAB7  000AB8  00001
//! JUMPS                 00FF00  00FF3B  00003C  00001
//! VECS                  00FFFA  00FFFF  000006  00001
//! ```
//!
//! Addresses are bare hex. The ROM origin is fixed at $F000 and covers the
//! top 4 KiB, so a segment's offset within the image is its start address
//! minus the origin.

use log::{debug, warn};

/// Fixed ROM origin; the image covers $F000-$FFFF.
pub const ROM_ORIGIN: u16 = 0xF000;

/// Required segment: main kernel code.
pub const SEG_CODE: &str = "CODE";
/// Required segment: kernel API jump table.
pub const SEG_JUMPS: &str = "JUMPS";
/// Required segment: interrupt vectors.
pub const SEG_VECS: &str = "VECS";

/// One segment row from the map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment name as written in the map.
    pub name: String,
    /// Start address in CPU space.
    pub start: u16,
    /// End address in CPU space (inclusive).
    pub end: u16,
    /// Segment size in bytes.
    pub size: usize,
}

/// Failures surfaced by the ROM loader.
///
/// The system is never left half-loaded: `power_on` returns one of these
/// and the caller treats it as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The map text contained no parsable segment section.
    EmptyMap,
    /// A required segment is absent from the map.
    MissingSegment(&'static str),
    /// A segment claims to start below the ROM origin.
    SegmentOutsideRom { name: String, start: u16 },
    /// The ROM image is too short to supply a segment's bytes.
    ImageTooShort {
        name: String,
        needed: usize,
        image_len: usize,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::EmptyMap => write!(f, "no segments found in map file"),
            LoadError::MissingSegment(name) => {
                write!(f, "required segment {} missing from map file", name)
            }
            LoadError::SegmentOutsideRom { name, start } => write!(
                f,
                "segment {} starts at ${:04X}, below the ROM origin ${:04X}",
                name, start, ROM_ORIGIN
            ),
            LoadError::ImageTooShort {
                name,
                needed,
                image_len,
            } => write!(
                f,
                "ROM image is {} bytes but segment {} needs {}",
                image_len, name, needed
            ),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parses the segment section of a linker map file.
///
/// Scans for the `Segment list:` header, then collects rows until the
/// first blank line. Rule lines (leading `-`) and rows whose address
/// columns are not hex (the column header) are skipped. Returns
/// [`LoadError::EmptyMap`] when nothing parses.
pub fn parse_map(text: &str) -> Result<Vec<Segment>, LoadError> {
    let mut segments = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        if !in_section {
            if line.contains("Segment list:") {
                in_section = true;
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            break; // end of section
        }
        if trimmed.starts_with('-') {
            continue; // rule line
        }

        match parse_segment_line(trimmed) {
            Some(segment) => {
                debug!(
                    "parsed segment {}: ${:04X}-${:04X} ({} bytes)",
                    segment.name, segment.start, segment.end, segment.size
                );
                segments.push(segment);
            }
            None => {
                // Column headers land here too, so only warn once rows
                // have started appearing.
                if !segments.is_empty() {
                    warn!("skipping unparsable map line: {:?}", trimmed);
                }
            }
        }
    }

    if segments.is_empty() {
        return Err(LoadError::EmptyMap);
    }
    Ok(segments)
}

/// Parses one `NAME START END SIZE ALIGN` row; `None` when the columns do
/// not fit.
fn parse_segment_line(line: &str) -> Option<Segment> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let start = u32::from_str_radix(fields.next()?, 16).ok()?;
    let end = u32::from_str_radix(fields.next()?, 16).ok()?;
    let size = usize::from_str_radix(fields.next()?, 16).ok()?;
    // Align column must at least be present
    fields.next()?;

    Some(Segment {
        name: name.to_string(),
        start: start as u16,
        end: end as u16,
        size,
    })
}

/// Finds a segment by name.
pub fn find_segment<'a>(segments: &'a [Segment], name: &str) -> Option<&'a Segment> {
    segments.iter().find(|s| s.name == name)
}

/// Returns the slice of `image` holding `segment`'s bytes.
///
/// The image is laid out from the ROM origin, so the slice starts at
/// `segment.start - ROM_ORIGIN`.
pub fn segment_bytes<'a>(image: &'a [u8], segment: &Segment) -> Result<&'a [u8], LoadError> {
    if segment.start < ROM_ORIGIN {
        return Err(LoadError::SegmentOutsideRom {
            name: segment.name.clone(),
            start: segment.start,
        });
    }

    let offset = (segment.start - ROM_ORIGIN) as usize;
    let needed = offset + segment.size;
    image
        .get(offset..needed)
        .ok_or_else(|| LoadError::ImageTooShort {
            name: segment.name.clone(),
            needed,
            image_len: image.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MAP: &str = "\
Modules list:
-------------
main.o:
    CODE              Offs=000000  Size=000AB8

Segment list:
-------------
Name                   Start   End     Size    Align
----------------------------------------------------
CODE                  00F000  00FAB7  000AB8  00001
RODATA                00FAB8  00FB00  000049  00001
JUMPS                 00FF00  00FF3B  00003C  00001
VECS                  00FFFA  00FFFF  000006  00001

Exports list by name:
---------------------
";

    #[test]
    fn test_parse_sample_map() {
        let segments = parse_map(SAMPLE_MAP).unwrap();
        assert_eq!(segments.len(), 4);

        let code = find_segment(&segments, SEG_CODE).unwrap();
        assert_eq!(code.start, 0xF000);
        assert_eq!(code.end, 0xFAB7);
        assert_eq!(code.size, 0x0AB8);

        let vecs = find_segment(&segments, SEG_VECS).unwrap();
        assert_eq!(vecs.start, 0xFFFA);
        assert_eq!(vecs.size, 6);
    }

    #[test]
    fn test_parse_stops_at_blank_line() {
        let segments = parse_map(SAMPLE_MAP).unwrap();
        // Nothing from the exports section leaked in
        assert!(find_segment(&segments, "Exports").is_none());
    }

    #[test]
    fn test_segment_section_required() {
        assert_eq!(parse_map("no segments here"), Err(LoadError::EmptyMap));
        assert_eq!(
            parse_map("Segment list:\n----\nName Start End Size Align\n----\n\n"),
            Err(LoadError::EmptyMap)
        );
    }

    #[test]
    fn test_header_row_is_skipped() {
        // The column header parses as five fields but its address columns
        // are not hex, so it must not become a segment.
        let segments = parse_map(SAMPLE_MAP).unwrap();
        assert!(segments.iter().all(|s| s.name != "Name"));
    }

    #[test]
    fn test_segment_bytes_offsets_from_origin() {
        let mut image = vec![0u8; 0x1000];
        image[0x0FFA] = 0xAA; // start of VECS
        image[0x0FFF] = 0xBB;

        let vecs = Segment {
            name: "VECS".into(),
            start: 0xFFFA,
            end: 0xFFFF,
            size: 6,
        };

        let bytes = segment_bytes(&image, &vecs).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(bytes[0], 0xAA);
        assert_eq!(bytes[5], 0xBB);
    }

    #[test]
    fn test_segment_bytes_rejects_short_image() {
        let image = vec![0u8; 0x100];
        let code = Segment {
            name: "CODE".into(),
            start: 0xF000,
            end: 0xFAB7,
            size: 0x0AB8,
        };

        match segment_bytes(&image, &code) {
            Err(LoadError::ImageTooShort {
                needed, image_len, ..
            }) => {
                assert_eq!(needed, 0x0AB8);
                assert_eq!(image_len, 0x100);
            }
            other => panic!("expected ImageTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_segment_bytes_rejects_low_start() {
        let image = vec![0u8; 0x1000];
        let bogus = Segment {
            name: "LOW".into(),
            start: 0x8000,
            end: 0x8FFF,
            size: 0x1000,
        };
        assert!(matches!(
            segment_bytes(&image, &bogus),
            Err(LoadError::SegmentOutsideRom { .. })
        ));
    }
}
