//! Serde model for the frame-index JSON that accompanies a spritesheet.
//!
//! Input shape: `{"frames": {name: {"frame": {x,y,w,h}, ...}}}` — anything
//! beyond the `frame` rectangle (rotation flags, durations, trim data) is
//! tolerated and dropped, since realignment recomputes all of it.
//!
//! Output shape adds `spriteSourceSize` / `sourceSize` per frame and a `meta`
//! block naming the packed image, matching what the game's loader expects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── JSON-facing types ─────────────────────────────────────────────────────────

/// Integer pixel rectangle within a spritesheet image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSize {
    pub w: u32,
    pub h: u32,
}

/// One named frame of the input sheet.
#[derive(Clone, Debug, Deserialize)]
pub struct InputFrame {
    pub frame: FrameRect,
}

/// The parsed input frame index. The map is insertion-ordered so output
/// layout follows the order frames appear in the file.
#[derive(Clone, Debug, Deserialize)]
pub struct SheetIndex {
    pub frames: IndexMap<String, InputFrame>,
}

impl SheetIndex {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ── Output types ──────────────────────────────────────────────────────────────

/// One realigned frame: an exact grid cell, no trim, no source offset.
#[derive(Clone, Debug, Serialize)]
pub struct AlignedFrame {
    pub frame: FrameRect,
    #[serde(rename = "spriteSourceSize")]
    pub sprite_source_size: FrameRect,
    #[serde(rename = "sourceSize")]
    pub source_size: SheetSize,
}

#[derive(Clone, Debug, Serialize)]
pub struct SheetMeta {
    /// File name of the packed image this index describes.
    pub image: String,
    pub size: SheetSize,
}

/// The rewritten frame index for the repacked sheet.
#[derive(Clone, Debug, Serialize)]
pub struct AlignedIndex {
    pub frames: IndexMap<String, AlignedFrame>,
    pub meta: SheetMeta,
}

impl AlignedIndex {
    /// Pretty-printed JSON; stable field and frame order, so repeated runs
    /// produce byte-identical files.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "frames": {
            "walk_2": { "frame": { "x": 64, "y": 0, "w": 64, "h": 80 } },
            "idle_0": { "frame": { "x": 0, "y": 0, "w": 64, "h": 80 }, "rotated": false }
        }
    }"#;

    #[test]
    fn parses_frames_in_file_order() {
        let index = SheetIndex::from_json(SAMPLE).unwrap();
        let names: Vec<&str> = index.frames.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["walk_2", "idle_0"]);
    }

    #[test]
    fn parses_frame_rect() {
        let index = SheetIndex::from_json(SAMPLE).unwrap();
        let rect = index.frames["walk_2"].frame;
        assert_eq!(rect, FrameRect { x: 64, y: 0, w: 64, h: 80 });
    }

    #[test]
    fn unknown_per_frame_fields_are_ignored() {
        // "rotated" on idle_0 must not fail the parse.
        assert!(SheetIndex::from_json(SAMPLE).is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SheetIndex::from_json("{\"frames\": [").is_err());
    }

    #[test]
    fn output_uses_camel_case_keys() {
        let mut frames = IndexMap::new();
        frames.insert("idle_0".to_string(), AlignedFrame {
            frame:              FrameRect { x: 0, y: 0, w: 192, h: 192 },
            sprite_source_size: FrameRect { x: 0, y: 0, w: 192, h: 192 },
            source_size:        SheetSize { w: 192, h: 192 },
        });
        let index = AlignedIndex {
            frames,
            meta: SheetMeta {
                image: "player_fixed.png".to_string(),
                size: SheetSize { w: 768, h: 192 },
            },
        };
        let json = index.to_json_pretty().unwrap();
        assert!(json.contains("\"spriteSourceSize\""));
        assert!(json.contains("\"sourceSize\""));
        assert!(json.contains("\"player_fixed.png\""));
    }

    #[test]
    fn output_json_is_deterministic() {
        let build = || {
            let mut frames = IndexMap::new();
            for name in ["b", "a", "c"] {
                frames.insert(name.to_string(), AlignedFrame {
                    frame:              FrameRect { x: 0, y: 0, w: 8, h: 8 },
                    sprite_source_size: FrameRect { x: 0, y: 0, w: 8, h: 8 },
                    source_size:        SheetSize { w: 8, h: 8 },
                });
            }
            AlignedIndex {
                frames,
                meta: SheetMeta { image: "s.png".to_string(), size: SheetSize { w: 24, h: 8 } },
            }
        };
        assert_eq!(build().to_json_pretty().unwrap(), build().to_json_pretty().unwrap());
        // Insertion order survives serialization.
        let json = build().to_json_pretty().unwrap();
        let (b, a) = (json.find("\"b\"").unwrap(), json.find("\"a\"").unwrap());
        assert!(b < a, "frames must serialize in insertion order");
    }
}
