#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// 0x00RRGGBB, the layout minifb expects.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

pub const PALETTE_GRAYSCALE: [Rgb; 4] = [
    Rgb::new(0xFF, 0xFF, 0xFF), // lightest (white)
    Rgb::new(0xAA, 0xAA, 0xAA),
    Rgb::new(0x55, 0x55, 0x55),
    Rgb::new(0x00, 0x00, 0x00), // darkest (black)
];

pub const PALETTE_DMG_GREEN: [Rgb; 4] = [
    Rgb::new(0x9B, 0xBC, 0x0F),
    Rgb::new(0x8B, 0xAC, 0x0F),
    Rgb::new(0x30, 0x62, 0x30),
    Rgb::new(0x0F, 0x38, 0x0F),
];

/// The two print palettes. Index `i` is the same shade in both, so a print
/// can be retinted one index at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Grayscale,
    DmgGreen,
}

impl Palette {
    pub fn colors(self) -> &'static [Rgb; 4] {
        match self {
            Palette::Grayscale => &PALETTE_GRAYSCALE,
            Palette::DmgGreen => &PALETTE_DMG_GREEN,
        }
    }

    pub fn color(self, shade: u8) -> Rgb {
        self.colors()[(shade & 0x03) as usize]
    }

    /// Shade 3, used to clear the canvas before a print is painted.
    pub fn background(self) -> Rgb {
        self.color(3)
    }

    pub fn toggled(self) -> Palette {
        match self {
            Palette::Grayscale => Palette::DmgGreen,
            Palette::DmgGreen => Palette::Grayscale,
        }
    }

    pub fn from_dmg_flag(dmg: bool) -> Palette {
        if dmg { Palette::DmgGreen } else { Palette::Grayscale }
    }

    pub fn is_dmg(self) -> bool {
        self == Palette::DmgGreen
    }

    pub fn name(self) -> &'static str {
        match self {
            Palette::Grayscale => "Grayscale",
            Palette::DmgGreen => "DMG Green",
        }
    }
}
