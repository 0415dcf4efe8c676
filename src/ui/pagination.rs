//! Page-jump controls for the listing.
//!
//! [`render`] turns `(current, total)` into the ordered control row:
//!
//! ```text
//! ‹‹  «  1  ...  3  4 [5] 6  7  ...  50  »  ››
//! ```
//!
//! Each control carries a precomputed target. Activating an enabled control
//! reports its target exactly once; disabled controls and ellipses report
//! nothing.

/// Width of the numbered window on each side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// Distance covered by the jump controls.
pub const JUMP_DISTANCE: u32 = 10;

/// Columns between two rendered controls.
pub const CONTROL_GAP: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    JumpBack,
    Previous,
    Page { number: u32, active: bool },
    Ellipsis,
    Next,
    JumpForward,
}

/// One element of the pagination row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    /// Page to jump to; `None` for ellipses.
    pub target: Option<u32>,
    pub disabled: bool,
}

impl PageControl {
    fn button(kind: ControlKind, label: impl Into<String>, target: u32, disabled: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            target: Some(target),
            disabled,
        }
    }

    fn page(number: u32, current: u32) -> Self {
        Self::button(
            ControlKind::Page {
                number,
                active: number == current,
            },
            number.to_string(),
            number,
            false,
        )
    }

    fn ellipsis() -> Self {
        Self {
            kind: ControlKind::Ellipsis,
            label: "...".to_string(),
            target: None,
            disabled: true,
        }
    }

    /// Invokes `on_jump` with the target, unless the control is inert.
    ///
    /// Returns whether `on_jump` was called.
    pub fn activate(&self, on_jump: impl FnOnce(u32)) -> bool {
        match self.target {
            Some(target) if !self.disabled => {
                on_jump(target);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.kind, ControlKind::Page { active: true, .. })
    }
}

/// Builds the control row for page `current` of `total`.
///
/// Inputs are normalized so that `1 <= current <= total`.
///
/// # Examples
///
/// ```
/// use cinescope::ui::pagination::render;
///
/// let controls = render(1, 1);
/// let disabled: Vec<_> = controls.iter().filter(|c| c.disabled).map(|c| c.label.as_str()).collect();
/// assert_eq!(disabled, ["‹‹", "«", "»", "››"]);
/// ```
#[must_use]
pub fn render(current: u32, total: u32) -> Vec<PageControl> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    let back = current.saturating_sub(JUMP_DISTANCE).max(1);
    let forward = current.saturating_add(JUMP_DISTANCE).min(total);
    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total);

    let mut controls = vec![
        PageControl::button(ControlKind::JumpBack, "‹‹", back, back == current),
        PageControl::button(ControlKind::Previous, "«", current.saturating_sub(1).max(1), current == 1),
    ];

    if start > 1 {
        controls.push(PageControl::page(1, current));
    }
    if start > 2 {
        controls.push(PageControl::ellipsis());
    }
    controls.extend((start..=end).map(|n| PageControl::page(n, current)));
    if end + 1 < total {
        controls.push(PageControl::ellipsis());
    }
    if end < total {
        controls.push(PageControl::page(total, current));
    }

    controls.push(PageControl::button(
        ControlKind::Next,
        "»",
        current.saturating_add(1).min(total),
        current == total,
    ));
    controls.push(PageControl::button(ControlKind::JumpForward, "››", forward, forward == current));
    controls
}

/// Column span `[start, end)` of each control when rendered left to right
/// from column 0 with [`CONTROL_GAP`] between controls.
#[must_use]
pub fn layout(controls: &[PageControl]) -> Vec<(usize, usize)> {
    let mut col = 0;
    controls
        .iter()
        .map(|c| {
            let width = c.label.chars().count() + 2;
            let span = (col, col + width);
            col += width + CONTROL_GAP;
            span
        })
        .collect()
}

/// Index of the control covering column `col`, if any.
#[must_use]
pub fn hit_test(spans: &[(usize, usize)], col: usize) -> Option<usize> {
    spans.iter().position(|(start, end)| (*start..*end).contains(&col))
}

/// Finds the first control of `kind`, ignoring page numbers.
#[must_use]
pub fn find(controls: &[PageControl], kind: ControlKind) -> Option<&PageControl> {
    controls.iter().find(|c| c.kind == kind)
}
