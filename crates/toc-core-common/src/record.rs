//! The output record emitted for every surviving site row.

use crate::schema::{COLUMN_SCHEMA, column_count};

/// Offset added to `CELL.G_BCCH` to obtain the planning tool's channel number.
pub const CHANNEL_OFFSET: i32 = 3599;
/// Constant base index written for every record.
pub const BASE_INDEX: u16 = 3;
/// Constant frequency offset written for every record.
pub const FREQ_OFF: u16 = 3;
/// Mobile network code of the operator.
pub const MNC: u16 = 1001;
/// Mobile country code of the operator.
pub const MCC: u16 = 262;

/// Decimal separator convention used when rendering decimal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalStyle {
    /// `52.123456`
    #[default]
    Period,
    /// `52,123456`
    Comma,
}

impl DecimalStyle {
    /// Renders a decimal value in this convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use toc_core_common::DecimalStyle;
    ///
    /// assert_eq!(DecimalStyle::Period.format(52.5), "52.5");
    /// assert_eq!(DecimalStyle::Comma.format(52.5), "52,5");
    /// assert_eq!(DecimalStyle::Comma.format(0.0), "0");
    /// ```
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let text = value.to_string();
        match self {
            DecimalStyle::Period => text,
            DecimalStyle::Comma => text.replace('.', ","),
        }
    }
}

/// One row of the BTS output table.
///
/// Field order and naming follow [`COLUMN_SCHEMA`]; [`OutputRecord::to_row`]
/// is the only place that maps fields to columns.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub name: String,
    pub pos_longitude: f64,
    pub pos_latitude: f64,
    pub pos_error_direction: f64,
    pub pos_error_lambda1: f64,
    pub pos_error_lambda2: f64,
    pub power: f64,
    /// `1` when the antenna is directed, otherwise `0`.
    pub is_directed: u8,
    pub direction: i32,
    /// 1-based ordinal, `0` until the pipeline assigns it.
    pub unique_id: usize,
    pub base_index: u16,
    pub channel: i32,
    pub freq_off: u16,
    pub mnc: u16,
    pub mcc: u16,
    pub lac: i32,
    pub lac_hex: String,
    pub cell_ne_id: String,
    pub site_bs_type: String,
    pub antenna_system: String,
}

impl Default for OutputRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            pos_longitude: 0.0,
            pos_latitude: 0.0,
            pos_error_direction: 0.0,
            pos_error_lambda1: 0.0,
            pos_error_lambda2: 0.0,
            power: 0.0,
            is_directed: 0,
            direction: 0,
            unique_id: 0,
            base_index: BASE_INDEX,
            channel: 0,
            freq_off: FREQ_OFF,
            mnc: MNC,
            mcc: MCC,
            lac: 0,
            lac_hex: String::new(),
            cell_ne_id: String::new(),
            site_bs_type: String::new(),
            antenna_system: String::new(),
        }
    }
}

impl OutputRecord {
    /// Sets the directional flag from the antenna azimuth.
    pub fn set_direction(&mut self, direction: i32) {
        self.direction = direction;
        self.is_directed = u8::from(direction > 0);
    }

    /// Sets the channel derived from `CELL.G_BCCH`.
    ///
    /// Returns the channel, or `None` without touching the record when the
    /// offset channel does not fit an `i32`.
    #[must_use]
    pub fn set_bcch(&mut self, bcch: i32) -> Option<i32> {
        let channel = bcch.checked_add(CHANNEL_OFFSET)?;
        self.channel = channel;
        Some(channel)
    }

    /// Sets the location area code and its uppercase hexadecimal text.
    pub fn set_lac(&mut self, lac: i32) {
        self.lac = lac;
        self.lac_hex = format!("{lac:X}");
    }

    /// Renders the record as cell texts in [`COLUMN_SCHEMA`] order.
    #[must_use]
    pub fn to_row(&self, style: DecimalStyle) -> Vec<String> {
        let row = vec![
            self.name.clone(),
            style.format(self.pos_longitude),
            style.format(self.pos_latitude),
            style.format(self.pos_error_direction),
            style.format(self.pos_error_lambda1),
            style.format(self.pos_error_lambda2),
            style.format(self.power),
            self.is_directed.to_string(),
            self.direction.to_string(),
            self.unique_id.to_string(),
            self.base_index.to_string(),
            self.channel.to_string(),
            self.freq_off.to_string(),
            self.mnc.to_string(),
            self.mcc.to_string(),
            self.lac.to_string(),
            self.lac_hex.clone(),
            self.cell_ne_id.clone(),
            self.site_bs_type.clone(),
            self.antenna_system.clone(),
        ];
        debug_assert_eq!(row.len(), column_count());
        debug_assert_eq!(COLUMN_SCHEMA.len(), row.len());
        row
    }
}
