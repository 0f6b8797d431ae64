//! Flow Classification
//!
//! A stabilizer flow records how one check propagates through the circuit, tagged with
//! string flags describing its tile color and measurement basis. This module folds the
//! (color, basis) pair of a flow into a single small integer that downstream circuit
//! annotation and decoding tools can carry as an opaque extra detector coordinate.
//!

use std::collections::BTreeSet;

/// the three tile colors of a color code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    /// the string flag a flow carries for this color
    pub fn flag(&self) -> &'static str {
        match self {
            Color::Red => "color=r",
            Color::Green => "color=g",
            Color::Blue => "color=b",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Color::Red,
            1 => Color::Green,
            2 => Color::Blue,
            _ => panic!("invalid color index {}, must be within [0, 2]", index),
        }
    }
}

/// measurement basis of a stabilizer check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    X,
    Z,
}

impl Basis {
    pub const ALL: [Basis; 2] = [Basis::X, Basis::Z];

    /// the string flag a flow carries for this basis
    pub fn flag(&self) -> &'static str {
        match self {
            Basis::X => "basis=X",
            Basis::Z => "basis=Z",
        }
    }

    /// additive offset on top of the color index, separating X and Z classes
    pub fn offset(&self) -> usize {
        match self {
            Basis::X => 0,
            Basis::Z => 3,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Basis::X => 'X',
            Basis::Z => 'Z',
        }
    }

    pub fn from_char(basis: char) -> Self {
        match basis {
            'X' => Basis::X,
            'Z' => Basis::Z,
            _ => panic!("invalid basis character '{}', must be 'X' or 'Z'", basis),
        }
    }
}

/// a record of one stabilizer measurement propagating through the circuit;
/// the circuit builders only ever inspect its color and basis flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub flags: BTreeSet<String>,
}

impl Flow {
    pub fn new(color: Color, basis: Basis) -> Self {
        let mut flags = BTreeSet::new();
        flags.insert(color.flag().to_string());
        flags.insert(basis.flag().to_string());
        Self { flags }
    }

    pub fn new_raw(flags: BTreeSet<String>) -> Self {
        Self { flags }
    }

    /// the unique color flag of this flow; a missing or duplicated color flag is a bug
    /// in the layout that generated the flow, not a recoverable input error
    pub fn color(&self) -> Color {
        let mut found = None;
        for color in Color::ALL {
            if self.flags.contains(color.flag()) {
                assert!(found.is_none(), "flow carries more than one color flag: {:?}", self.flags);
                found = Some(color);
            }
        }
        match found {
            Some(color) => color,
            None => panic!("flow carries no color flag: {:?}", self.flags),
        }
    }

    /// the unique basis flag of this flow, with the same error policy as [`Self::color`]
    pub fn basis(&self) -> Basis {
        let mut found = None;
        for basis in Basis::ALL {
            if self.flags.contains(basis.flag()) {
                assert!(found.is_none(), "flow carries more than one basis flag: {:?}", self.flags);
                found = Some(basis);
            }
        }
        match found {
            Some(basis) => basis,
            None => panic!("flow carries no basis flag: {:?}", self.flags),
        }
    }
}

/// encode the (color, basis) pair of a flow into a single extra detector coordinate:
/// color contributes 0/1/2 (r/g/b) and basis contributes 0/3 (X/Z), so the result is
/// always within [0, 5] and uniquely identifies one of the six check classes
pub fn flow_extra_coords(flow: &Flow) -> Vec<f64> {
    vec![(flow.color().index() + flow.basis().offset()) as f64]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_classifier_all_six_classes() {  // cargo test flow_classifier_all_six_classes -- --nocapture
        let expected = [
            (Color::Red, Basis::X, 0.),
            (Color::Green, Basis::X, 1.),
            (Color::Blue, Basis::X, 2.),
            (Color::Red, Basis::Z, 3.),
            (Color::Green, Basis::Z, 4.),
            (Color::Blue, Basis::Z, 5.),
        ];
        for (color, basis, tag) in expected {
            let flow = Flow::new(color, basis);
            assert_eq!(flow_extra_coords(&flow), vec![tag]);
        }
    }

    #[test]
    fn flow_classifier_ignores_unrelated_flags() {  // cargo test flow_classifier_ignores_unrelated_flags -- --nocapture
        let mut flags = BTreeSet::new();
        flags.insert("color=b".to_string());
        flags.insert("basis=Z".to_string());
        flags.insert("postselect".to_string());
        assert_eq!(flow_extra_coords(&Flow::new_raw(flags)), vec![5.]);
    }

    #[test]
    #[should_panic]
    fn flow_classifier_missing_color() {  // cargo test flow_classifier_missing_color -- --nocapture
        let mut flags = BTreeSet::new();
        flags.insert("basis=X".to_string());
        flow_extra_coords(&Flow::new_raw(flags));
    }

    #[test]
    #[should_panic]
    fn flow_classifier_missing_basis() {  // cargo test flow_classifier_missing_basis -- --nocapture
        let mut flags = BTreeSet::new();
        flags.insert("color=r".to_string());
        flow_extra_coords(&Flow::new_raw(flags));
    }

    #[test]
    #[should_panic]
    fn flow_classifier_empty_flags() {  // cargo test flow_classifier_empty_flags -- --nocapture
        flow_extra_coords(&Flow::new_raw(BTreeSet::new()));
    }

    #[test]
    #[should_panic]
    fn flow_classifier_ambiguous_color() {  // cargo test flow_classifier_ambiguous_color -- --nocapture
        let mut flags = BTreeSet::new();
        flags.insert("color=r".to_string());
        flags.insert("color=g".to_string());
        flags.insert("basis=X".to_string());
        flow_extra_coords(&Flow::new_raw(flags));
    }
}
