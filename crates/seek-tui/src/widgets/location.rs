//! Location pane — what lives at the router's current location.
//!
//! The home location shows an overview of the index; an indexed route shows
//! the item and, for repositories, everything underneath it.

use crate::router::HOME;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use seek_core::{ItemCategory, SearchIndex, SearchableItem};

const CATEGORIES: [(ItemCategory, &str); 6] = [
    (ItemCategory::Repository, "repositories"),
    (ItemCategory::Pipeline, "pipelines"),
    (ItemCategory::Schedule, "schedules"),
    (ItemCategory::Sensor, "sensors"),
    (ItemCategory::PartitionSet, "partition sets"),
    (ItemCategory::Other, "pages"),
];

pub struct LocationView<'a> {
    location: &'a str,
    index: Option<&'a SearchIndex>,
    theme: &'a Theme,
}

impl<'a> LocationView<'a> {
    pub fn new(location: &'a str, index: Option<&'a SearchIndex>, theme: &'a Theme) -> Self {
        Self {
            location,
            index,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let Some(index) = self.index else {
            return vec![Line::styled(
                "No workspace index is loaded. Try :reload.",
                self.theme.muted,
            )];
        };
        if self.location == HOME {
            return self.overview(index);
        }
        match index.find_by_path(self.location) {
            Some(item) => self.detail(index, item),
            None => vec![Line::styled(
                format!("Nothing indexed at {}", self.location),
                self.theme.muted,
            )],
        }
    }

    fn overview(&self, index: &SearchIndex) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::styled("Workspace", self.theme.prompt.add_modifier(Modifier::BOLD)),
            Line::default(),
        ];
        for (category, plural) in CATEGORIES {
            let n = index.count(category);
            if n == 0 {
                continue;
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {n:>4} "), self.theme.category_style(category)),
                Span::raw(plural),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Press / to search, or pick an entry on the left.",
            self.theme.muted,
        ));
        lines
    }

    fn detail(&self, index: &SearchIndex, item: &SearchableItem) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::styled(
                item.label.clone(),
                self.theme.prompt.add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled(
                    item.category.to_string(),
                    self.theme.category_style(item.category),
                ),
                Span::styled(
                    item.context
                        .as_deref()
                        .map(|c| format!("  in {c}"))
                        .unwrap_or_default(),
                    self.theme.muted,
                ),
            ]),
            Line::styled(item.path.clone(), self.theme.muted),
        ];

        if item.category == ItemCategory::Repository {
            let prefix = format!("{}/", item.path);
            let children: Vec<_> = index
                .sorted_by_path()
                .into_iter()
                .filter(|child| child.path.starts_with(&prefix))
                .collect();
            lines.push(Line::default());
            lines.push(Line::raw(format!("Definitions ({})", children.len())));
            lines.extend(children.into_iter().map(|child| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<14}", child.category.to_string()),
                        self.theme.category_style(child.category),
                    ),
                    Span::raw(child.label.clone()),
                ])
            }));
        }
        lines
    }
}

impl Widget for LocationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Location ")
            .border_style(self.theme.border_unfocused);
        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seek_core::WorkspaceSnapshot;

    fn text_of(view: &LocationView) -> Vec<String> {
        view.lines().iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn home_shows_category_counts() {
        let theme = Theme::load_default();
        let index = WorkspaceSnapshot::demo().into_index();
        let view = LocationView::new(HOME, Some(&index), &theme);
        let lines = text_of(&view);
        let pipelines = index.count(ItemCategory::Pipeline);
        assert!(lines
            .iter()
            .any(|l| l.contains(&pipelines.to_string()) && l.contains("pipelines")));
    }

    #[test]
    fn repository_lists_its_definitions() {
        let theme = Theme::load_default();
        let index: SearchIndex = [
            SearchableItem::new("etl", "/workspace/etl@prod", ItemCategory::Repository),
            SearchableItem::new(
                "ingest",
                "/workspace/etl@prod/pipelines/ingest",
                ItemCategory::Pipeline,
            ),
            SearchableItem::new(
                "other",
                "/workspace/etl2@prod/pipelines/other",
                ItemCategory::Pipeline,
            ),
        ]
        .into_iter()
        .collect();
        let view = LocationView::new("/workspace/etl@prod", Some(&index), &theme);
        let lines = text_of(&view);
        assert!(lines.contains(&"Definitions (1)".to_string()));
        assert!(lines.iter().any(|l| l.ends_with("ingest")));
        assert!(!lines.iter().any(|l| l.ends_with("other")));
    }

    #[test]
    fn unknown_location_and_missing_index() {
        let theme = Theme::load_default();
        let index = SearchIndex::default();
        let view = LocationView::new("/nowhere", Some(&index), &theme);
        assert_eq!(text_of(&view), ["Nothing indexed at /nowhere"]);

        let view = LocationView::new(HOME, None, &theme);
        assert!(text_of(&view)[0].contains(":reload"));
    }
}
