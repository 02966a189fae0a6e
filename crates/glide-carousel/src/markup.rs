//! Markup handed to the host's render surface.

use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::action::Action;

pub const CONTROLS_ID: &str = "controls";
pub const INDICATOR_GROUP_ID: &str = "scrollMarkerGroup";
pub const SCROLLVIEW_ID: &str = "scrollview";
/// Form field shared by every indicator; its value is the current index.
pub const INDICATOR_NAME: &str = "targetCurrentIndex";

const STYLES: &str = "
:where(*) { margin: 0; padding: 0; box-sizing: border-box; }
:host { display: flex; flex-direction: column; }

button { background: none; }
button ::slotted(*) { pointer-events: none; }

#scrollview {
  display: flex;
  flex: 1;
  overflow-x: scroll;
  scroll-snap-type: x mandatory;
  scroll-behavior: smooth;
  scrollbar-width: none;
  overscroll-behavior-x: contain;
}

#scrollview ::slotted(*) {
  scroll-snap-align: center;
  flex: 0 0 100%;
}";

/// One position indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub selected: bool,
}

pub type Indicators = SmallVec<[Indicator; 8]>;

/// One indicator per slide, the first selected.
pub fn indicators(count: usize) -> Indicators {
    (0..count)
        .map(|index| Indicator {
            index,
            selected: index == 0,
        })
        .collect()
}

fn button(action: Action) -> String {
    format!(
        "<button part=button data-action=\"{action}\" aria-label=\"{label}\" aria-controls=\"{SCROLLVIEW_ID}\">\n    <slot name={action}></slot>\n  </button>",
        label = action.label(),
    )
}

/// The fixed structure: controls header, indicator group, scroll region.
pub fn static_markup() -> String {
    format!(
        "<style>{STYLES}</style>
<header id={CONTROLS_ID} part=controls>
  {prev}
  <form id=\"{INDICATOR_GROUP_ID}\" part=\"scroll-marker-group\" aria-label=\"Carousel Indicators\"></form>
  {next}
</header>
<div id={SCROLLVIEW_ID} role=\"region\" aria-label=\"Image Slider\" tabindex=\"0\">
  <slot id=scrollviewContent></slot>
</div>",
        prev = button(Action::Prev),
        next = button(Action::Next),
    )
}

pub fn indicator_markup(indicators: &[Indicator]) -> String {
    let mut out = String::new();
    for ind in indicators {
        let _ = writeln!(
            out,
            "<input type=radio name={INDICATOR_NAME} part=\"scroll-marker\" value=\"{}\"{}/>",
            ind.index,
            if ind.selected { " checked" } else { "" },
        );
    }
    out
}
