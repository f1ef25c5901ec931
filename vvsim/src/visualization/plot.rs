//! Three-panel time series viewer
//!
//! Position, velocity and total energy are drawn as stacked line plots that
//! share the time axis. All data-to-screen math lives in [`PlotLayout`] and
//! runs without a window; the Bevy app only spawns labels and replays the
//! precomputed polylines and grid lines through gizmos every frame.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::WindowResolution;
use tracing::info;

use crate::configuration::config::DEFAULT_TITLE;
use crate::simulation::states::Trajectory;

/// Space reserved around and between the panels, in logical pixels
const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 55.0;
const MARGIN_BOTTOM: f32 = 55.0;
const PANEL_GAP: f32 = 28.0;

/// Approximate number of ticks per axis
const TICK_TARGET: usize = 5;

const TITLE_FONT: f32 = 20.0;
const LABEL_FONT: f32 = 16.0;
const TICK_FONT: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub title: String, // combined title
    pub width: f32, // window width
    pub height: f32, // window height
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1000.0,
            height: 600.0,
        }
    }
}

/// Closed value interval shown on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Tight range over `values` with 5% padding on both sides
    /// A flat series is widened so it still maps to a finite, non-zero span
    pub fn from_values(values: &[f64]) -> Self {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        if lo > hi {
            // empty or all non-finite
            return AxisRange { min: -1.0, max: 1.0 };
        }

        let span = hi - lo;
        let mid = 0.5 * (lo + hi);
        let pad = if span > 1e-12 * mid.abs().max(1.0) {
            0.05 * span
        } else {
            (0.05 * mid.abs()).max(0.5)
        };

        AxisRange {
            min: lo - pad,
            max: hi + pad,
        }
    }

    /// Range spanning exactly the first and last sample, used for the shared time axis
    pub fn exact(values: &[f64]) -> Self {
        match (values.first(), values.last()) {
            (Some(&a), Some(&b)) if b > a => AxisRange { min: a, max: b },
            (Some(&a), _) => AxisRange { min: a, max: a + 1.0 },
            _ => AxisRange { min: 0.0, max: 1.0 },
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map `value` linearly from this range onto `[lo, hi]`
    pub fn map(&self, value: f64, lo: f32, hi: f32) -> f32 {
        let u = (value - self.min) / self.span();
        lo + (u as f32) * (hi - lo)
    }

    /// Tick values at a 1-2-5 step inside the range
    pub fn ticks(&self) -> Vec<f64> {
        let step = nice_step(self.span() / TICK_TARGET as f64);
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;

        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Decimal places needed to tell adjacent ticks apart
    pub fn tick_precision(&self) -> usize {
        let step = nice_step(self.span() / TICK_TARGET as f64);
        (-step.log10().floor()).max(0.0) as usize
    }
}

/// Round `raw` up to the nearest 1, 2 or 5 times a power of ten
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let frac = raw / mag;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Stack `count` equal-height panels top to bottom inside a `width` x `height`
/// canvas centered on the origin (Bevy 2D coordinates, y up)
pub fn panel_rects(width: f32, height: f32, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let left = -0.5 * width + MARGIN_LEFT;
    let right = 0.5 * width - MARGIN_RIGHT;
    let top = 0.5 * height - MARGIN_TOP;
    let bottom = -0.5 * height + MARGIN_BOTTOM;

    let gaps = PANEL_GAP * (count - 1) as f32;
    let panel_h = ((top - bottom - gaps) / count as f32).max(1.0);

    (0..count)
        .map(|i| {
            let y_max = top - i as f32 * (panel_h + PANEL_GAP);
            Rect::new(left, y_max - panel_h, right, y_max)
        })
        .collect()
}

/// One subplot, fully resolved to screen space
#[derive(Debug, Clone)]
pub struct Panel {
    pub label: &'static str, // y-axis label
    pub color: Color, // line color
    pub rect: Rect, // screen-space plot area
    pub y_range: AxisRange, // value range mapped to the rect height
    pub points: Vec<Vec2>, // polyline in screen space
    pub y_ticks: Vec<(f64, f32)>, // (value, screen y)
    pub y_precision: usize, // decimals for tick labels
}

/// Screen-space description of the whole figure
#[derive(Resource, Debug, Clone)]
pub struct PlotLayout {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub t_range: AxisRange,
    pub x_ticks: Vec<(f64, f32)>, // (time, screen x), shared by every panel
    pub x_precision: usize,
    pub panels: Vec<Panel>,
}

impl PlotLayout {
    pub fn new(traj: &Trajectory, settings: &PlotSettings) -> Self {
        let series: [(&'static str, Color, &[f64]); 3] = [
            ("x(t)", Color::srgb(0.12, 0.29, 0.85), traj.x()),
            ("v(t)", Color::srgb(0.10, 0.60, 0.18), traj.v()),
            ("E(t)", Color::srgb(0.85, 0.12, 0.12), traj.energy()),
        ];

        let rects = panel_rects(settings.width, settings.height, series.len());
        let t = traj.t();
        let t_range = AxisRange::exact(t);

        // every panel shares the same horizontal extent
        let (left, right) = rects
            .first()
            .map(|r| (r.min.x, r.max.x))
            .unwrap_or((0.0, 0.0));
        let x_ticks = t_range
            .ticks()
            .into_iter()
            .map(|tv| (tv, t_range.map(tv, left, right)))
            .collect();

        let panels = series
            .into_iter()
            .zip(rects)
            .map(|((label, color, values), rect)| {
                let y_range = AxisRange::from_values(values);
                let points = t
                    .iter()
                    .zip(values)
                    .map(|(&tv, &yv)| {
                        Vec2::new(
                            t_range.map(tv, rect.min.x, rect.max.x),
                            y_range.map(yv, rect.min.y, rect.max.y),
                        )
                    })
                    .collect();
                let y_ticks = y_range
                    .ticks()
                    .into_iter()
                    .map(|yv| (yv, y_range.map(yv, rect.min.y, rect.max.y)))
                    .collect();

                Panel {
                    label,
                    color,
                    rect,
                    y_range,
                    points,
                    y_ticks,
                    y_precision: y_range.tick_precision(),
                }
            })
            .collect();

        Self {
            title: settings.title.clone(),
            width: settings.width,
            height: settings.height,
            t_range,
            x_ticks,
            x_precision: t_range.tick_precision(),
            panels,
        }
    }
}

/// Open the viewer window and block until it is closed
pub fn run_plot(traj: &Trajectory, settings: &PlotSettings) -> AppExit {
    info!(samples = traj.len(), title = %settings.title, "starting plot viewer");

    let layout = PlotLayout::new(traj, settings);

    App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(layout)
        .add_plugins(
            DefaultPlugins
                .build()
                // tracing subscriber is installed by main
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: settings.title.clone(),
                        resolution: WindowResolution::new(settings.width, settings.height),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_systems(Startup, setup_labels_system)
        .add_systems(Update, draw_panels_system)
        .run()
}

fn text(value: impl Into<String>, size: f32, pos: Vec2, anchor: Anchor) -> Text2dBundle {
    Text2dBundle {
        text: Text::from_section(
            value,
            TextStyle {
                font_size: size,
                color: Color::BLACK,
                ..default()
            },
        ),
        text_anchor: anchor,
        transform: Transform::from_xyz(pos.x, pos.y, 1.0),
        ..default()
    }
}

/// Format a tick value with `precision` decimals, without a negative zero
pub fn format_tick(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

fn setup_labels_system(mut commands: Commands, layout: Res<PlotLayout>) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn(text(
        layout.title.clone(),
        TITLE_FONT,
        Vec2::new(0.0, 0.5 * layout.height - 0.5 * MARGIN_TOP),
        Anchor::Center,
    ));

    for panel in &layout.panels {
        let r = panel.rect;

        commands.spawn(text(
            panel.label,
            LABEL_FONT,
            Vec2::new(r.min.x - 55.0, r.center().y),
            Anchor::CenterRight,
        ));

        for &(value, y) in &panel.y_ticks {
            commands.spawn(text(
                format_tick(value, panel.y_precision),
                TICK_FONT,
                Vec2::new(r.min.x - 6.0, y),
                Anchor::CenterRight,
            ));
        }
    }

    // time labels only under the bottom panel
    if let Some(bottom) = layout.panels.last() {
        let y = bottom.rect.min.y;
        for &(value, x) in &layout.x_ticks {
            commands.spawn(text(
                format_tick(value, layout.x_precision),
                TICK_FONT,
                Vec2::new(x, y - 6.0),
                Anchor::TopCenter,
            ));
        }
        commands.spawn(text(
            "Time",
            LABEL_FONT,
            Vec2::new(bottom.rect.center().x, y - 26.0),
            Anchor::TopCenter,
        ));
    }
}

fn draw_panels_system(mut gizmos: Gizmos, layout: Res<PlotLayout>) {
    let grid = Color::srgb(0.85, 0.85, 0.85);
    let frame = Color::srgb(0.2, 0.2, 0.2);

    for panel in &layout.panels {
        let r = panel.rect;

        // grid
        for &(_, x) in &layout.x_ticks {
            gizmos.line_2d(Vec2::new(x, r.min.y), Vec2::new(x, r.max.y), grid);
        }
        for &(_, y) in &panel.y_ticks {
            gizmos.line_2d(Vec2::new(r.min.x, y), Vec2::new(r.max.x, y), grid);
        }

        // frame
        gizmos.linestrip_2d(
            [
                r.min,
                Vec2::new(r.max.x, r.min.y),
                r.max,
                Vec2::new(r.min.x, r.max.y),
                r.min,
            ],
            frame,
        );

        // data
        gizmos.linestrip_2d(panel.points.iter().copied(), panel.color);
    }
}
