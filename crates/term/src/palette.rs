//! Color bands to terminal styles.
//!
//! Band 0 is the freshest: bold and bright. Later bands cool off towards a
//! dim ember so an aging marker visibly fades out before it disappears.

use crate::fb::{CellStyle, Rgb};
use crate::types::{ColorBand, PALETTE_BANDS};

const FRESH: Rgb = Rgb::new(255, 244, 170);
const EMBER: Rgb = Rgb::new(110, 28, 18);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    bands: [CellStyle; PALETTE_BANDS as usize],
    pub border: CellStyle,
}

impl Palette {
    pub fn style(&self, band: ColorBand) -> CellStyle {
        self.bands[band.index()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        let last = (PALETTE_BANDS - 1) as usize;
        let bands = std::array::from_fn(|i| {
            let t = (i * 255 / last) as u8;
            let style = CellStyle::fg(FRESH.mix(EMBER, t));
            match i {
                0 => style.bold(),
                i if i == last => style.dim(),
                _ => style,
            }
        });
        Self {
            bands,
            border: CellStyle::fg(Rgb::new(120, 130, 150)),
        }
    }
}
