// ============================================================================
// PricingTableView : selectable plan cards for a pricing table
// ============================================================================
// Consumes the query state and renders exactly one of four views, in
// priority order: loading, error, empty, card grid. The grid filters
// plans by the active billing interval and highlights one card; Enter
// selects it through the caller-supplied callback.
//
// The loading, error and card renderers are each overridable through the
// props; the two Style fields are the container/card styling hooks.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};
use tracing::info;

use crate::hook::{PricingTableOptions, PricingTableQuery, PricingTableState};
use crate::models::{PricingTable, PricingTableItem};

/// Message shown when the table has no plans (distinct from the error
/// view).
pub const NO_PLANS_MESSAGE: &str = "No pricing plans available";

// ============================================================================
// Props
// ============================================================================

/// Everything a card renderer needs for one plan.
pub struct CardProps<'a> {
    pub item: &'a PricingTableItem,

    /// True iff this plan's price id equals the caller's current price.
    pub is_current_price: bool,

    /// True for the card the keyboard highlight sits on.
    pub is_selected: bool,
}

/// Replacement renderer for the loading view.
pub type LoadingRenderer = Box<dyn Fn(&mut Frame, Rect)>;

/// Replacement renderer for the error view; receives the error message.
pub type ErrorRenderer = Box<dyn Fn(&mut Frame, Rect, &str)>;

/// Replacement renderer for one card.
pub type CardRenderer = Box<dyn Fn(&mut Frame, Rect, &CardProps)>;

/// Invoked when a plan is selected: price id plus the full item.
pub type SelectPriceCallback = Box<dyn FnMut(&str, &PricingTableItem)>;

/// Configuration of the component. All fields optional; defaults render
/// the built-in views with neutral styling and monthly billing.
#[derive(Default)]
pub struct PricingTableProps {
    /// Show yearly plans instead of monthly ones.
    pub annual: bool,

    /// Price id of the plan the caller is already subscribed to. The
    /// matching card renders a disabled "Current Plan" control.
    pub current_price_id: Option<String>,

    pub on_select_price: Option<SelectPriceCallback>,

    pub loading_renderer: Option<LoadingRenderer>,
    pub error_renderer: Option<ErrorRenderer>,
    pub card_renderer: Option<CardRenderer>,

    /// Styling hook for the surrounding grid area.
    pub style: Style,

    /// Styling hook applied to every default-rendered card.
    pub card_style: Style,
}

// ============================================================================
// View selection
// ============================================================================

/// The four mutually exclusive views, highest priority first.
enum View<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Grid(&'a PricingTable),
}

fn view_for(state: &PricingTableState) -> View<'_> {
    if state.loading {
        return View::Loading;
    }
    if let Some(error) = &state.error {
        return View::Error(error);
    }
    match &state.pricing_table {
        Some(table) if !table.is_empty() => View::Grid(table),
        _ => View::Empty,
    }
}

/// Interval tag shown under each billing mode. Plans with any other tag
/// are excluded from both modes.
fn interval_tag(annual: bool) -> &'static str {
    if annual {
        "year"
    } else {
        "month"
    }
}

// ============================================================================
// Component
// ============================================================================

/// A pricing table rendered as a row of selectable plan cards.
pub struct PricingTableView {
    query: PricingTableQuery,
    props: PricingTableProps,
    selected: usize,
}

impl PricingTableView {
    /// Mounts the component against the hosted endpoint.
    pub fn new(options: PricingTableOptions, props: PricingTableProps) -> Self {
        Self::with_query(PricingTableQuery::mount(options), props)
    }

    /// Wraps an existing query; used when the caller controls the fetch
    /// source.
    pub fn with_query(query: PricingTableQuery, props: PricingTableProps) -> Self {
        Self {
            query,
            props,
            selected: 0,
        }
    }

    pub fn props(&self) -> &PricingTableProps {
        &self.props
    }

    /// Re-runs the query for new inputs and resets the highlight.
    pub fn set_options(&mut self, options: PricingTableOptions) {
        self.query.set_options(options);
        self.selected = 0;
    }

    pub fn set_annual(&mut self, annual: bool) {
        if self.props.annual != annual {
            self.props.annual = annual;
            self.selected = 0;
        }
    }

    /// Flips between monthly and annual billing.
    pub fn toggle_billing(&mut self) {
        let annual = self.props.annual;
        self.set_annual(!annual);
    }

    pub fn set_current_price_id(&mut self, price_id: Option<String>) {
        self.props.current_price_id = price_id;
    }

    /// Number of plans visible under the active billing mode.
    pub fn visible_count(&self) -> usize {
        let state = self.query.snapshot();
        match &state.pricing_table {
            Some(table) => table.items_with_interval(interval_tag(self.props.annual)).len(),
            None => 0,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selects the highlighted plan.
    ///
    /// Invokes `on_select_price` and returns the price id, unless the
    /// highlighted card is already the current price, in which case
    /// nothing happens.
    pub fn select(&mut self) -> Option<String> {
        let state = self.query.snapshot();
        let table = state.pricing_table.as_ref()?;
        let items = table.items_with_interval(interval_tag(self.props.annual));
        let item = *items.get(self.selected.min(items.len().checked_sub(1)?))?;

        if self.props.current_price_id.as_deref() == Some(item.price_id.as_str()) {
            return None;
        }

        info!(price = %item.price_id, plan = %item.name, "plan selected");
        if let Some(callback) = self.props.on_select_price.as_mut() {
            callback(&item.price_id, item);
        }
        Some(item.price_id.clone())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draws the active view into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let state = self.query.snapshot();
        match view_for(&state) {
            View::Loading => match &self.props.loading_renderer {
                Some(renderer) => renderer(frame, area),
                None => render_loading(frame, area),
            },
            View::Error(message) => match &self.props.error_renderer {
                Some(renderer) => renderer(frame, area, message),
                None => render_error(frame, area, message),
            },
            View::Empty => render_empty(frame, area),
            View::Grid(table) => self.render_grid(frame, area, table),
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, table: &PricingTable) {
        let container = Block::default().style(self.props.style);
        let inner = container.inner(area);
        frame.render_widget(container, area);

        let items = table.items_with_interval(interval_tag(self.props.annual));
        if items.is_empty() {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, items.len() as u32); items.len()])
            .split(inner);

        let selected = self.selected.min(items.len() - 1);
        for (index, item) in items.iter().copied().enumerate() {
            let card = CardProps {
                item,
                is_current_price: self.props.current_price_id.as_deref()
                    == Some(item.price_id.as_str()),
                is_selected: index == selected,
            };
            match &self.props.card_renderer {
                Some(renderer) => renderer(frame, columns[index], &card),
                None => render_card(frame, columns[index], &card, self.props.card_style),
            }
        }
    }
}

// ============================================================================
// Default renderers
// ============================================================================

/// Default loading view.
fn render_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading pricing plans...",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

/// Default error view.
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Error loading pricing: {message}"),
            Style::default().fg(Color::Red),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Default empty view: the table exists but carries no plans.
fn render_empty(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            NO_PLANS_MESSAGE,
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

/// Default card: bordered block with name, description, price, trial,
/// feature list and the action line.
fn render_card(frame: &mut Frame, area: Rect, card: &CardProps, card_style: Style) {
    let border_style = if card.is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if card.item.is_highlight {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", card.item.name))
        .title_alignment(Alignment::Center)
        .style(card_style);

    if card.item.is_highlight {
        if let Some(highlight) = &card.item.highlight_text {
            block = block.title(
                Title::from(Span::styled(
                    format!(" {highlight} "),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                ))
                .position(Position::Bottom)
                .alignment(Alignment::Center),
            );
        }
    }

    let mut lines = Vec::new();

    if let Some(description) = &card.item.product_description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        card.item.display_price(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if let Some(trial) = card.item.trial_label() {
        lines.push(Line::from(Span::styled(
            trial,
            Style::default().fg(Color::Gray),
        )));
    }

    if !card.item.feature_list.is_empty() {
        lines.push(Line::from(""));
        for feature in &card.item.feature_list {
            lines.push(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(feature.clone()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(action_line(card));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Action line: disabled "Current Plan" for the active subscription,
/// otherwise the plan's call to action.
fn action_line(card: &CardProps) -> Line<'static> {
    if card.is_current_price {
        return Line::from(Span::styled(
            "Current Plan",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let style = if card.is_selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
        Span::styled(card.item.action_label().to_string(), style),
    ])
}

// ============================================================================
// Tests
// ============================================================================
