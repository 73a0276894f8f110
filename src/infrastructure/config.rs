use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub source: SourceSettings,
    #[serde(default)]
    pub pipelines: Vec<PipelineConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    /// Fixed CSV resource, e.g. `http://localhost:8000/export.csv`.
    pub url: Option<String>,
    /// Station endpoint queried with today's date instead of a fixed URL.
    pub station: Option<StationSettings>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StationSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub id: String,
    pub title: String,
    #[serde(default = "default_date_column")]
    pub date: Column,
    #[serde(default = "default_time_column")]
    pub time: Column,
    #[serde(default)]
    pub invalid_values: InvalidValuePolicy,
    pub series: Vec<SeriesConfig>,
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub column: Column,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default)]
    pub required: bool,
    pub unit: Option<String>,
    pub color: Option<String>,
    pub axis: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AxisConfig {
    pub id: String,
    pub title: String,
    #[serde(default = "default_axis_position")]
    pub position: String,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

/// Where a field lives in a row: looked up by header name, or at a fixed
/// position regardless of the header.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "ColumnRef")]
pub enum Column {
    Header(String),
    Position(usize),
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Header(name) => write!(f, "{}", name),
            Column::Position(idx) => write!(f, "#{}", idx),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ColumnRef {
    header: Option<String>,
    position: Option<usize>,
}

impl TryFrom<ColumnRef> for Column {
    type Error = String;

    fn try_from(value: ColumnRef) -> Result<Self, Self::Error> {
        match (value.header, value.position) {
            (Some(header), None) => Ok(Column::Header(header)),
            (None, Some(position)) => Ok(Column::Position(position)),
            (Some(_), Some(_)) => Err("column takes either `header` or `position`, not both".into()),
            (None, None) => Err("column needs a `header` or a `position`".into()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Numeric,
    Compass,
}

/// What to do with a numeric field that is empty or does not parse.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvalidValuePolicy {
    /// Drop the whole row.
    #[default]
    SkipRow,
    /// Keep the row and store NaN for the field.
    Placeholder,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_user_agent() -> String {
    format!("station-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_date_column() -> Column {
    Column::Header("Data".to_string())
}

fn default_time_column() -> Column {
    Column::Header("Ora".to_string())
}

fn default_axis_position() -> String {
    "left".to_string()
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()
        .context("Failed to read config/dashboard")?;

    let config: DashboardConfig = settings
        .try_deserialize()
        .context("Invalid dashboard configuration")?;
    config.validate()?;
    Ok(config)
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.source.url.is_none() && self.source.station.is_none() {
            anyhow::bail!("source needs either `url` or `station.base_url`");
        }

        for pipeline in &self.pipelines {
            if pipeline.series.is_empty() {
                anyhow::bail!("pipeline {} has no series", pipeline.id);
            }
            if !pipeline.series.iter().any(|s| s.required) {
                anyhow::bail!("pipeline {} needs at least one required series", pipeline.id);
            }
            for series in &pipeline.series {
                if !pipeline.axes.is_empty() && !pipeline.axes.iter().any(|a| a.id == series.axis) {
                    anyhow::bail!(
                        "series {} of pipeline {} references unknown axis {}",
                        series.id,
                        pipeline.id,
                        series.axis
                    );
                }
            }
        }

        let mut ids: Vec<&str> = self.pipelines.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            anyhow::bail!("pipeline ids must be unique");
        }

        Ok(())
    }
}
