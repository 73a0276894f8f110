// Shared test pipelines and CSV samples
use crate::infrastructure::config::{
    AxisConfig, Column, InvalidValuePolicy, PipelineConfig, SeriesConfig, ValueKind,
};

pub const HEADER: &str =
    "Data;Ora;Temp;MinTemp;MaxTemp;Umid;Dew;Vento;Dir;Raffica;DirRaffica;Press";

pub const SAMPLE_CSV: &str = "Data;Ora;Temp;MinTemp;MaxTemp;Umid;Dew;Vento;Dir;Raffica;DirRaffica;Press
Unita di misura;;°C;°C;°C;%;°C;km/h;;km/h;;hPa
01/03/2024;14:30;12,5;10,0;15,0;60,2;8,1;10,4;NE;15,2;NE;1013,2
01/03/2024;14:35;12,7;10,0;15,0;59,8;8,0;8,3;ENE;12,0;NE;1013,1
01/03/2024;14:40;;10,0;15,0;59,8;8,0;;;;;1013,1
01/03/2024;14:45;12,9;10,0;15,0;59,1;7,9;11,0;SW;19,4;SSW;1013,0

";

fn series(id: &str, column: Column, kind: ValueKind, required: bool, axis: &str) -> SeriesConfig {
    SeriesConfig {
        id: id.to_string(),
        name: id.to_string(),
        column,
        kind,
        required,
        unit: None,
        color: None,
        axis: axis.to_string(),
    }
}

fn axis(id: &str) -> AxisConfig {
    AxisConfig {
        id: id.to_string(),
        title: id.to_string(),
        position: "left".to_string(),
        y_min: None,
        y_max: None,
    }
}

pub fn weather_pipeline() -> PipelineConfig {
    let header = |name: &str| Column::Header(name.to_string());
    PipelineConfig {
        id: "weather".to_string(),
        title: "Meteo".to_string(),
        date: header("Data"),
        time: header("Ora"),
        invalid_values: InvalidValuePolicy::SkipRow,
        series: vec![
            series("temp", header("Temp"), ValueKind::Numeric, true, "yTemp"),
            series("hum", header("Umid"), ValueKind::Numeric, false, "yHum"),
            series("press", header("Press"), ValueKind::Numeric, false, "yPress"),
        ],
        axes: vec![axis("yTemp"), axis("yHum"), axis("yPress")],
    }
}

pub fn wind_pipeline() -> PipelineConfig {
    PipelineConfig {
        id: "wind".to_string(),
        title: "Vento".to_string(),
        date: Column::Position(0),
        time: Column::Position(1),
        invalid_values: InvalidValuePolicy::SkipRow,
        series: vec![
            series("wind", Column::Position(7), ValueKind::Numeric, true, "yWind"),
            series("gust", Column::Position(9), ValueKind::Numeric, true, "yWind"),
            series("dir", Column::Position(8), ValueKind::Compass, true, "yDirection"),
        ],
        axes: vec![axis("yWind"), axis("yDirection")],
    }
}
