//! Selectable board tile.
//!
//! A tile is activated three ways: a direct click, a dwell (hovering until
//! the dwell threshold elapses), or a scanner selection. All three run the
//! same click handler. Folder tiles additionally reset the scanner when
//! selected, so scanning restarts at the top of the folder that opens.

use crate::scanner::Scanner;
use cboard_core::{Millis, TimerHandle};
use cboard_foundation::dwell_constants::DWELL_INDICATOR_MAX_HEIGHT_PERCENT;
use cboard_foundation::{DwellActivator, DwellCallback, DwellConfig, HoverTracker, HoverTransition};
use cboard_ui_graphics::{Color, ColorParseError, Point, Rect};
use std::fmt;
use std::rc::Rc;

pub type TileId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileVariant {
    #[default]
    Button,
    Folder,
    Board,
}

/// Optional colors applied to the tile shape.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TileStyle {
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
}

impl TileStyle {
    /// Builds a style from the CSS color strings stored in board definitions.
    pub fn from_css(
        background_color: Option<&str>,
        border_color: Option<&str>,
    ) -> Result<Self, ColorParseError> {
        Ok(Self {
            background_color: background_color.map(Color::parse_css).transpose()?,
            border_color: border_color.map(Color::parse_css).transpose()?,
        })
    }
}

/// What the presentation layer needs to draw dwell progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DwellIndicator {
    pub dwelling: bool,
    /// Indicator height as a percentage of the tile, shrinking as progress is stored.
    pub height_percent: f32,
    /// Time left until activation, used as the fill animation duration.
    pub animation_duration_ms: Millis,
}

impl DwellIndicator {
    pub fn class_name(&self) -> &'static str {
        if self.dwelling {
            "dwell-indicator dwelling"
        } else {
            "dwell-indicator"
        }
    }
}

pub struct Tile {
    id: TileId,
    label: String,
    variant: TileVariant,
    style: TileStyle,
    class_name: Option<String>,
    bounds: Rect,
    on_click: Option<DwellCallback>,
    timers: TimerHandle,
    dwell: DwellActivator,
    hover: HoverTracker,
}

impl Tile {
    pub fn new(id: TileId, label: impl Into<String>, bounds: Rect, timers: TimerHandle) -> Self {
        let dwell = DwellActivator::new(timers.clone(), DwellConfig::default());
        Self {
            id,
            label: label.into(),
            variant: TileVariant::default(),
            style: TileStyle::default(),
            class_name: None,
            bounds,
            on_click: None,
            timers,
            dwell,
            hover: HoverTracker::new(),
        }
    }

    pub fn with_variant(mut self, variant: TileVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_style(mut self, style: TileStyle) -> Self {
        self.style = style;
        self
    }

    /// Extra class appended after the base `Tile` class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_dwell_config(mut self, config: DwellConfig) -> Self {
        self.dwell.dispose();
        self.dwell = DwellActivator::new(self.timers.clone(), config);
        self.dwell.set_callback(self.on_click.clone());
        self
    }

    /// Sets the click handler, which also becomes the dwell activation.
    pub fn with_on_click(mut self, handler: impl Fn() + 'static) -> Self {
        let handler: DwellCallback = Rc::new(handler);
        self.dwell.set_callback(Some(Rc::clone(&handler)));
        self.on_click = Some(handler);
        self
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn variant(&self) -> TileVariant {
        self.variant
    }

    pub fn is_folder(&self) -> bool {
        self.variant == TileVariant::Folder
    }

    pub fn style(&self) -> TileStyle {
        self.style
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn dwell(&self) -> &DwellActivator {
        &self.dwell
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    /// Runs the click handler. Returns `false` when the tile has none.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                log::debug!("tile {} ({}) activated", self.id, self.label);
                handler();
                true
            }
            None => false,
        }
    }

    pub fn pointer_enter(&self) {
        self.dwell.on_pointer_enter();
    }

    pub fn pointer_leave(&self) {
        self.dwell.on_pointer_leave();
    }

    /// Feeds a pointer position and forwards boundary crossings to the dwell behavior.
    pub fn update_hover(&mut self, position: Point) -> Option<HoverTransition> {
        let transition = self.hover.update(self.bounds, position);
        self.forward(transition);
        transition
    }

    /// Hover decided by the board's hit test rather than by this tile's bounds.
    pub fn set_hovered(&mut self, hovered: bool) -> Option<HoverTransition> {
        let transition = self.hover.set_hovered(hovered);
        self.forward(transition);
        transition
    }

    /// The pointer left the board surface.
    pub fn pointer_left_surface(&mut self) -> Option<HoverTransition> {
        let transition = self.hover.pointer_left();
        self.forward(transition);
        transition
    }

    fn forward(&self, transition: Option<HoverTransition>) {
        match transition {
            Some(HoverTransition::Entered) => self.pointer_enter(),
            Some(HoverTransition::Exited) => self.pointer_leave(),
            None => {}
        }
    }

    /// Selection from an external scanner: activates the tile, and a folder
    /// tile also resets the scanner.
    pub fn on_scan_select(&self, scanner: &dyn Scanner) {
        self.click();
        if self.is_folder() {
            log::debug!("folder tile {} selected; resetting scanner", self.id);
            scanner.reset();
        }
    }

    pub fn class_names(&self) -> String {
        let mut names = String::from("Tile");
        if let Some(extra) = &self.class_name {
            names.push(' ');
            names.push_str(extra);
        }
        if self.is_folder() {
            names.push_str(" Tile--folder");
        }
        names
    }

    pub fn shape_class_names(&self) -> &'static str {
        if self.is_folder() {
            "TileShape TileShape--folder"
        } else {
            "TileShape"
        }
    }

    pub fn dwell_indicator(&self) -> DwellIndicator {
        DwellIndicator {
            dwelling: self.dwell.is_dwelling(),
            height_percent: self.dwell.remaining_fraction() * DWELL_INDICATOR_MAX_HEIGHT_PERCENT,
            animation_duration_ms: self.dwell.remaining_millis(),
        }
    }

    /// Cancels any pending dwell activation; called when the tile unmounts.
    pub fn dispose(&mut self) {
        self.hover = HoverTracker::new();
        self.dwell.dispose();
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("bounds", &self.bounds)
            .field("has_on_click", &self.on_click.is_some())
            .field("dwell", &self.dwell)
            .finish()
    }
}
