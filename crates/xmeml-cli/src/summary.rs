use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xmeml_cli::pipeline::{ClipKind, DurationSource, GenerationReport, PlacedClip};

pub fn print_summary(report: &GenerationReport) {
    println!(
        "Sequence: {} ({} frames)",
        report.sequence_name, report.sequence_duration
    );
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    match report.script_chars {
        Some(chars) => println!("Script: {chars} characters"),
        None => println!("Script: unreadable"),
    }
    println!("{}", summary_table(report));
}

fn summary_table(report: &GenerationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Clip"),
        header_cell("Kind"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Frames"),
        header_cell("Scale"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [2, 3, 4, 5] {
        align_column(&mut table, index, CellAlignment::Right);
    }

    if report.clips.is_empty() {
        table.add_row(vec![
            dim_cell("no clips placed"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    for clip in &report.clips {
        table.add_row(vec![
            Cell::new(&clip.name),
            kind_cell(clip.kind),
            Cell::new(clip.start),
            Cell::new(clip.end),
            length_cell(clip),
            match clip.scale {
                Some(scale) => Cell::new(format!("{scale:.2}%")),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: ClipKind) -> Cell {
    let color = match kind {
        ClipKind::Voiceover => Color::Green,
        ClipKind::Video => Color::Blue,
        ClipKind::Image => Color::Magenta,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn length_cell(clip: &PlacedClip) -> Cell {
    let text = format!(
        "{} ({})",
        clip.end.saturating_sub(clip.start),
        clip.duration_source.as_str()
    );
    match clip.duration_source {
        DurationSource::Fallback => Cell::new(text).fg(Color::Yellow),
        DurationSource::Probed | DurationSource::Still => Cell::new(text),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_clips() {
        let report = GenerationReport {
            sequence_name: "Sequence 01".to_string(),
            sequence_duration: 300,
            clips: vec![PlacedClip {
                name: "voice.mp3".to_string(),
                kind: ClipKind::Voiceover,
                start: 0,
                end: 300,
                duration_source: DurationSource::Probed,
                scale: None,
            }],
            script_chars: Some(12),
            output: None,
        };
        let rendered = summary_table(&report).to_string();
        assert!(rendered.contains("voice.mp3"));
        assert!(rendered.contains("voiceover"));
        assert!(rendered.contains("Frames"));
        assert!(rendered.contains("300 (probed)"));
    }
}
