//! Static layout of the scrolling compass strip.
//!
//! The strip covers -180 to 540 degrees so the window never runs past either
//! end while the heading wraps. Every element carries its x position measured
//! from the strip's left edge.

use itertools::Itertools;

use crate::projector::{ProjectionConfig, STRIP_LEAD_DEGREES, STRIP_SPAN_DEGREES};

const FIRST_DEGREE: i32 = -180;
const LAST_DEGREE: i32 = 540;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    pub const ALL: [Cardinal; 8] = [
        Cardinal::N,
        Cardinal::NE,
        Cardinal::E,
        Cardinal::SE,
        Cardinal::S,
        Cardinal::SW,
        Cardinal::W,
        Cardinal::NW,
    ];

    pub fn degrees(self) -> i32 {
        self as i32 * 45
    }

    pub fn label(self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::NE => "NE",
            Cardinal::E => "E",
            Cardinal::SE => "SE",
            Cardinal::S => "S",
            Cardinal::SW => "SW",
            Cardinal::W => "W",
            Cardinal::NW => "NW",
        }
    }

    /// The cardinal direction at exactly `degrees`, if any.
    pub fn at(degrees: i32) -> Option<Self> {
        let normalized = normalize(degrees);
        (normalized % 45 == 0).then(|| Self::ALL[(normalized / 45) as usize])
    }
}

pub fn normalize(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickSize {
    Large,
    Medium,
    Small,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub degree: i32,
    pub x: f32,
    pub size: TickSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Degree,
    Cardinal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StripLabel {
    pub degree: i32,
    pub x: f32,
    pub text: String,
    pub kind: LabelKind,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strip {
    pub width: f32,
    pub ticks: Vec<Tick>,
    pub labels: Vec<StripLabel>,
}

impl Strip {
    pub fn generate(config: &ProjectionConfig) -> Self {
        let ppd = config.pixels_per_degree();
        let label_interval = config.label_interval() as i32;
        let x_of = |degree: i32| (degree as f32 + STRIP_LEAD_DEGREES) * ppd;

        let degrees = (FIRST_DEGREE..=LAST_DEGREE).step_by(config.tick_interval() as usize);

        let ticks = degrees
            .map(|degree| {
                let normalized = normalize(degree);
                let size = if Cardinal::at(degree).is_some() {
                    TickSize::Large
                } else if normalized % label_interval == 0 {
                    TickSize::Medium
                } else {
                    TickSize::Small
                };
                Tick {
                    degree,
                    x: x_of(degree),
                    size,
                }
            })
            .collect();

        // Labels walk every whole degree so they need not land on a tick.
        let degree_labels = (FIRST_DEGREE..=LAST_DEGREE)
            .filter(|degree| normalize(*degree) % label_interval == 0 && Cardinal::at(*degree).is_none())
            .map(|degree| StripLabel {
                degree,
                x: x_of(degree),
                text: normalize(degree).to_string(),
                kind: LabelKind::Degree,
            });

        let cardinal_labels = Cardinal::ALL
            .iter()
            .cartesian_product([0, -360, 360])
            .map(|(cardinal, wrap)| (cardinal, cardinal.degrees() + wrap))
            .filter(|(_, degree)| (FIRST_DEGREE..=LAST_DEGREE).contains(degree))
            .map(|(cardinal, degree)| StripLabel {
                degree,
                x: x_of(degree),
                text: cardinal.label().to_string(),
                kind: LabelKind::Cardinal,
            });

        Self {
            width: STRIP_SPAN_DEGREES * ppd,
            ticks,
            labels: degree_labels.chain(cardinal_labels).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(strip: &Strip, kind: LabelKind) -> Vec<&StripLabel> {
        strip.labels.iter().filter(|l| l.kind == kind).collect()
    }

    #[test]
    fn default_tick_count() {
        let config = ProjectionConfig::new(800.0, 150.0, 5, 15).unwrap();
        let strip = Strip::generate(&config);
        assert_eq!(strip.ticks.len(), 145);
        assert_eq!(strip.ticks.first().unwrap().degree, -180);
        assert_eq!(strip.ticks.last().unwrap().degree, 540);
        assert!((strip.width - 720.0 * config.pixels_per_degree()).abs() < 1e-2);
    }

    #[test]
    fn tick_sizes() {
        let strip = Strip::generate(&ProjectionConfig::default());
        let size_of = |degree| strip.ticks.iter().find(|t| t.degree == degree).unwrap().size;
        assert_eq!(size_of(0), TickSize::Large);
        assert_eq!(size_of(-135), TickSize::Large);
        assert_eq!(size_of(405), TickSize::Large);
        assert_eq!(size_of(15), TickSize::Medium);
        assert_eq!(size_of(-165), TickSize::Medium);
        assert_eq!(size_of(5), TickSize::Small);
        assert_eq!(size_of(-170), TickSize::Small);

        let large = strip.ticks.iter().filter(|t| t.size == TickSize::Large).count();
        let medium = strip.ticks.iter().filter(|t| t.size == TickSize::Medium).count();
        let small = strip.ticks.iter().filter(|t| t.size == TickSize::Small).count();
        assert_eq!((large, medium, small), (17, 32, 96));
    }

    #[test]
    fn degree_labels_skip_cardinals() {
        let strip = Strip::generate(&ProjectionConfig::default());
        let degree = labels(&strip, LabelKind::Degree);
        assert_eq!(degree.len(), 32);
        assert!(degree.iter().all(|l| l.degree % 45 != 0));
        let at_minus_165 = degree.iter().find(|l| l.degree == -165).unwrap();
        assert_eq!(at_minus_165.text, "195");
    }

    #[test]
    fn cardinal_labels_wrap() {
        let strip = Strip::generate(&ProjectionConfig::default());
        let cardinal = labels(&strip, LabelKind::Cardinal);
        assert_eq!(cardinal.len(), 17);

        let north: Vec<_> = cardinal.iter().filter(|l| l.text == "N").map(|l| l.degree).collect();
        assert_eq!(north, vec![0, 360]);
        let south: Vec<_> = cardinal.iter().filter(|l| l.text == "S").map(|l| l.degree).collect();
        assert_eq!(south, vec![180, -180, 540]);
    }

    #[test]
    fn positions_follow_pixels_per_degree() {
        let config = ProjectionConfig::new(300.0, 100.0, 5, 15).unwrap();
        let strip = Strip::generate(&config);
        assert_eq!(strip.ticks[0].x, 0.0);
        let north = strip.ticks.iter().find(|t| t.degree == 0).unwrap();
        assert_eq!(north.x, 540.0);
    }

    #[test]
    fn labels_between_ticks() {
        let config = ProjectionConfig::new(800.0, 150.0, 10, 15).unwrap();
        let strip = Strip::generate(&config);
        let first_quadrant: Vec<_> = labels(&strip, LabelKind::Degree)
            .iter()
            .map(|l| l.degree)
            .filter(|degree| (0..=90).contains(degree))
            .collect();
        assert_eq!(first_quadrant, vec![15, 30, 60, 75]);
    }

    #[test]
    fn wrapped_copies_match() {
        let config = ProjectionConfig::new(800.0, 150.0, 5, 25).unwrap();
        let strip = Strip::generate(&config);
        let degree = labels(&strip, LabelKind::Degree);

        let left: Vec<_> = degree
            .iter()
            .filter(|l| (-180..0).contains(&l.degree))
            .map(|l| (l.degree + 360, l.text.as_str()))
            .collect();
        let right: Vec<_> = degree
            .iter()
            .filter(|l| (180..360).contains(&l.degree))
            .map(|l| (l.degree, l.text.as_str()))
            .collect();
        assert!(!left.is_empty());
        assert_eq!(left, right);

        // every medium tick carries a numeric label and vice versa
        let medium: Vec<_> = strip
            .ticks
            .iter()
            .filter(|t| t.size == TickSize::Medium)
            .map(|t| t.degree)
            .collect();
        let labelled: Vec<_> = degree.iter().map(|l| l.degree).collect();
        assert_eq!(medium, labelled);
        assert_eq!(
            strip.ticks.iter().find(|t| t.degree == -175).unwrap().size,
            TickSize::Small
        );
        assert!(degree.iter().all(|l| l.degree != -175));
    }

    #[test]
    fn cardinal_lookup() {
        assert_eq!(Cardinal::at(-90), Some(Cardinal::W));
        assert_eq!(Cardinal::at(495), Some(Cardinal::SE));
        assert_eq!(Cardinal::at(30), None);
    }
}
