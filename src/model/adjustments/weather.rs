use crate::model::{
    adjustments::data::WeatherSignal,
    constants::{
        WEATHER_COLD_SEVERE_F, WEATHER_COLD_THRESHOLD_F, WEATHER_HOME_EDGE, WEATHER_PRECIPITATION_SEVERITY,
        WEATHER_WIND_SEVERE_MPH, WEATHER_WIND_THRESHOLD_MPH
    },
    structures::adjustment_delta::AdjustmentDelta
};

/// How much the conditions disrupt normal scoring, in `[0, 1]`. Indoor games are always 0.
pub fn severity(signal: &WeatherSignal) -> f64 {
    if signal.indoor {
        return 0.0;
    }

    let wind = signal.wind_mph.map_or(0.0, |mph| {
        ((mph - WEATHER_WIND_THRESHOLD_MPH) / (WEATHER_WIND_SEVERE_MPH - WEATHER_WIND_THRESHOLD_MPH)).clamp(0.0, 1.0)
    });
    let cold = signal.temperature_f.map_or(0.0, |f| {
        ((WEATHER_COLD_THRESHOLD_F - f) / (WEATHER_COLD_THRESHOLD_F - WEATHER_COLD_SEVERE_F)).clamp(0.0, 1.0)
    });
    let precipitation = if signal.precipitation {
        WEATHER_PRECIPITATION_SEVERITY
    } else {
        0.0
    };

    (wind + cold + precipitation).min(1.0)
}

/// The home side is used to its own conditions; rough weather shifts the edge toward it.
pub fn weather_adjustment(signal: Option<&WeatherSignal>) -> AdjustmentDelta {
    match signal {
        Some(w) => {
            let edge = severity(w) * WEATHER_HOME_EDGE;
            AdjustmentDelta::new(edge, -edge)
        }
        None => AdjustmentDelta::zero()
    }
}
