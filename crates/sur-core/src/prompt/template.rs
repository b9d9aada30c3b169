//! Song structure templates.
//!
//! One template per [`SongLength`], looked up through a static table keyed by
//! the enum. Each template lists the labelled sections the model must produce,
//! in order, with a target line count and an optional rhyme constraint.

use std::fmt;

use crate::song::SongLength;

/// The role a section plays in the song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Title,
    Chorus,
    ChorusReturn,
    Verse(u8),
    Bridge,
    Outro,
}

/// Rhyme constraint applied to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhymeScheme {
    /// Lines 1 & 2 rhyme, lines 3 & 4 rhyme.
    Aabb,
}

impl fmt::Display for RhymeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RhymeScheme::Aabb => write!(f, "AABB"),
        }
    }
}

/// Inclusive line-count range for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub min: u8,
    pub max: u8,
}

impl LineRange {
    const fn exact(lines: u8) -> Self {
        Self {
            min: lines,
            max: lines,
        }
    }

    const fn between(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{} Lines", self.min)
        } else {
            write!(f, "{}-{} Lines", self.min, self.max)
        }
    }
}

/// One labelled section of a structure template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub kind: SectionKind,
    /// `None` for the title line.
    pub lines: Option<LineRange>,
    pub rhyme: Option<RhymeScheme>,
    pub note: &'static str,
}

impl Section {
    const fn title() -> Self {
        Self {
            label: "Title",
            kind: SectionKind::Title,
            lines: None,
            rhyme: None,
            note: "Catchy Odia Title.",
        }
    }

    const fn chorus(lines: LineRange, note: &'static str) -> Self {
        Self {
            label: "Chorus",
            kind: SectionKind::Chorus,
            lines: Some(lines),
            rhyme: Some(RhymeScheme::Aabb),
            note,
        }
    }

    const fn chorus_return() -> Self {
        Self {
            label: "Chorus Return",
            kind: SectionKind::ChorusReturn,
            lines: Some(LineRange::exact(2)),
            rhyme: None,
            note: "",
        }
    }

    const fn verse(label: &'static str, number: u8, lines: LineRange, note: &'static str) -> Self {
        Self {
            label,
            kind: SectionKind::Verse(number),
            lines: Some(lines),
            rhyme: None,
            note,
        }
    }

    const fn bridge(lines: LineRange, note: &'static str) -> Self {
        Self {
            label: "Bridge",
            kind: SectionKind::Bridge,
            lines: Some(lines),
            rhyme: None,
            note,
        }
    }

    const fn outro(lines: LineRange, note: &'static str) -> Self {
        Self {
            label: "Outro",
            kind: SectionKind::Outro,
            lines: Some(lines),
            rhyme: None,
            note,
        }
    }

    /// Renders the section as one numbered line of the structure block.
    pub fn render(&self, position: usize) -> String {
        let mut line = match self.kind {
            SectionKind::Title => format!("{position}. **{}:**", self.label),
            _ => format!("{position}. **[{}]:**", self.label),
        };
        if let Some(lines) = self.lines {
            line.push_str(&format!(" {lines}."));
        }
        if let Some(rhyme) = self.rhyme {
            line.push_str(&format!(" {rhyme} Rhyme."));
        }
        if !self.note.is_empty() {
            line.push(' ');
            line.push_str(self.note);
        }
        line
    }
}

/// An ordered list of sections for one length bucket.
#[derive(Debug, PartialEq, Eq)]
pub struct StructureTemplate {
    pub length: SongLength,
    pub heading: &'static str,
    pub sections: &'static [Section],
}

impl StructureTemplate {
    /// Renders the heading and the numbered section list.
    pub fn render(&self) -> String {
        let mut out = format!("**{}:**\n", self.heading);
        for (index, section) in self.sections.iter().enumerate() {
            out.push_str(&section.render(index + 1));
            out.push('\n');
        }
        out
    }

    /// Iterates over the sections that carry a rhyme constraint.
    pub fn rhymed_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.rhyme.is_some())
    }

    /// Number of verse sections.
    pub fn verse_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.kind, SectionKind::Verse(_)))
            .count()
    }
}

static SHORT_SECTIONS: [Section; 4] = [
    Section::title(),
    Section::chorus(LineRange::exact(4), ""),
    Section::verse("Verse 1", 1, LineRange::between(4, 6), ""),
    Section::outro(LineRange::exact(2), ""),
];

static MEDIUM_SECTIONS: [Section; 6] = [
    Section::title(),
    Section::chorus(LineRange::exact(4), ""),
    Section::verse("Verse 1", 1, LineRange::between(4, 6), ""),
    Section::chorus_return(),
    Section::verse("Verse 2", 2, LineRange::between(4, 6), ""),
    Section::outro(LineRange::exact(2), ""),
];

static LONG_SECTIONS: [Section; 7] = [
    Section::title(),
    Section::chorus(LineRange::exact(4), ""),
    Section::verse("Verse 1", 1, LineRange::between(6, 8), "Detailed story."),
    Section::chorus_return(),
    Section::verse("Verse 2", 2, LineRange::between(6, 8), "Deep emotion."),
    Section::verse("Verse 3", 3, LineRange::between(6, 8), "Conclusion."),
    Section::outro(LineRange::exact(4), ""),
];

static EXTENDED_SECTIONS: [Section; 9] = [
    Section::title(),
    Section::chorus(LineRange::between(4, 6), "Strong Hook. High Energy."),
    Section::verse(
        "Verse 1",
        1,
        LineRange::exact(8),
        "Detailed storytelling. Set the scene clearly.",
    ),
    Section::chorus_return(),
    Section::verse(
        "Verse 2",
        2,
        LineRange::exact(8),
        "Deepen the emotion or conflict.",
    ),
    Section::bridge(
        LineRange::exact(4),
        "A change in tempo or perspective.",
    ),
    Section::verse("Verse 3", 3, LineRange::exact(8), "Emotional Climax."),
    Section::verse(
        "Verse 4",
        4,
        LineRange::exact(8),
        "Final resolution or philosophical thought.",
    ),
    Section::outro(LineRange::exact(4), "Slow fade out."),
];

static SHORT: StructureTemplate = StructureTemplate {
    length: SongLength::Short,
    heading: "SHORT SONG STRUCTURE",
    sections: &SHORT_SECTIONS,
};

static MEDIUM: StructureTemplate = StructureTemplate {
    length: SongLength::Medium,
    heading: "MEDIUM SONG STRUCTURE",
    sections: &MEDIUM_SECTIONS,
};

static LONG: StructureTemplate = StructureTemplate {
    length: SongLength::Long,
    heading: "LONG SONG STRUCTURE (5 Minutes)",
    sections: &LONG_SECTIONS,
};

static EXTENDED: StructureTemplate = StructureTemplate {
    length: SongLength::Extended,
    heading: "EXTENDED MOVIE SONG STRUCTURE (6+ Minutes)",
    sections: &EXTENDED_SECTIONS,
};

/// Returns the structure template for a length bucket.
pub fn template_for(length: SongLength) -> &'static StructureTemplate {
    match length {
        SongLength::Short => &SHORT,
        SongLength::Medium => &MEDIUM,
        SongLength::Long => &LONG,
        SongLength::Extended => &EXTENDED,
    }
}
