// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation shell abstraction.
//!
//! The visualizer core never touches widgets directly. It toggles named
//! regions, raises alerts and updates help text through
//! [`PresentationShell`]; the GUI draws whatever [`ShellState`] says.

use std::collections::VecDeque;

/// Help text shown while no product is pending.
pub const DRAG_HELP_TEXT: &str = "Drag vases from recommendations onto your image";

/// Help text shown once a product has been selected.
pub const PLACE_HELP_TEXT: &str = "Now tap on your image where you want to place this vase";

/// Named areas of the visualizer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    UploadArea,
    Canvas,
    Controls,
    RecommendationsPanel,
}

pub trait PresentationShell {
    fn set_visible(&mut self, region: Region, visible: bool);
    fn alert(&mut self, message: &str);
    fn set_help_text(&mut self, text: &str);
    fn highlight_product(&mut self, name: Option<&str>);
}

/// Shell state kept in memory and rendered by the GUI each frame.
#[derive(Debug, Clone)]
pub struct ShellState {
    upload_area: bool,
    canvas: bool,
    controls: bool,
    recommendations_panel: bool,
    alerts: VecDeque<String>,
    help_text: String,
    highlighted: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    /// A shell awaiting its first upload.
    pub fn new() -> Self {
        Self {
            upload_area: true,
            canvas: false,
            controls: false,
            recommendations_panel: false,
            alerts: VecDeque::new(),
            help_text: DRAG_HELP_TEXT.to_string(),
            highlighted: None,
        }
    }

    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::UploadArea => self.upload_area,
            Region::Canvas => self.canvas,
            Region::Controls => self.controls,
            Region::RecommendationsPanel => self.recommendations_panel,
        }
    }

    /// Take the oldest alert not yet shown.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alerts.pop_front()
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }
}

impl PresentationShell for ShellState {
    fn set_visible(&mut self, region: Region, visible: bool) {
        let flag = match region {
            Region::UploadArea => &mut self.upload_area,
            Region::Canvas => &mut self.canvas,
            Region::Controls => &mut self.controls,
            Region::RecommendationsPanel => &mut self.recommendations_panel,
        };
        *flag = visible;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }

    fn set_help_text(&mut self, text: &str) {
        self.help_text = text.to_string();
    }

    fn highlight_product(&mut self, name: Option<&str>) {
        self.highlighted = name.map(str::to_string);
    }
}
