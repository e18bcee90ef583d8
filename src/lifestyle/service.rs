use super::models::{LifestyleIndex, LifestyleInputs, Status};

/// Evaluate all nine activity advisories for the given readings.
///
/// Each advisory is its own ordered threshold ladder, worst tier first,
/// first match wins. The indices are independent of each other and the
/// full set is always produced.
pub fn evaluate(inputs: LifestyleInputs) -> Vec<LifestyleIndex> {
    let i = inputs.sanitized();

    vec![
        index("running", "Running", "run", running(&i)),
        index("outdoor-kids", "Outdoor play", "child", outdoor_kids(&i)),
        index("allergy", "Allergy risk", "flower", allergy(&i)),
        index("sensitive-groups", "Sensitive groups", "mask", sensitive_groups(&i)),
        index("barbecue", "Barbecue", "grill", barbecue(&i)),
        index("fishing", "Fishing", "fish", fishing(&i)),
        index("car-wash", "Car wash", "car", car_wash(&i)),
        index("gardening", "Gardening", "leaf", gardening(&i)),
        index("cycling", "Cycling", "bike", cycling(&i)),
    ]
}

fn index(id: &str, name: &str, icon: &str, verdict: (Status, &str)) -> LifestyleIndex {
    LifestyleIndex {
        id: id.to_string(),
        name: name.to_string(),
        status: verdict.0,
        label: verdict.1.to_string(),
        icon: icon.to_string(),
    }
}

fn running(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.aqi > 100.0
        || i.temperature >= 35.0
        || i.temperature <= -5.0
        || i.precipitation_probability >= 70.0
        || i.wind_speed >= 40.0
    {
        (Status::Bad, "Skip the run today")
    } else if i.aqi > 60.0
        || i.temperature >= 28.0
        || i.temperature <= 5.0
        || i.precipitation_probability >= 40.0
        || i.wind_speed >= 25.0
    {
        (Status::Moderate, "Keep it short and easy")
    } else {
        (Status::Good, "Great conditions for a run")
    }
}

fn outdoor_kids(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.aqi > 100.0 || i.temperature >= 36.0 || i.temperature <= -3.0 || i.precipitation_probability >= 60.0 {
        (Status::Bad, "Better to play inside")
    } else if i.uv_index >= 8.0 || i.temperature >= 30.0 || i.temperature <= 2.0 || i.precipitation_probability >= 35.0 || i.aqi > 60.0 {
        (Status::Moderate, "Short sessions, keep an eye on the sky")
    } else {
        (Status::Good, "Perfect for the playground")
    }
}

fn allergy(i: &LifestyleInputs) -> (Status, &'static str) {
    // Dry, windy air spreads pollen furthest.
    if i.wind_speed >= 25.0 && i.humidity < 40.0 {
        (Status::Bad, "High pollen spread, keep windows closed")
    } else if i.wind_speed >= 12.0 || i.humidity < 45.0 {
        (Status::Moderate, "Some pollen in the air")
    } else {
        (Status::Good, "Low allergy risk")
    }
}

fn sensitive_groups(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.aqi > 100.0 || i.temperature >= 38.0 || i.temperature <= -8.0 {
        (Status::Bad, "Stay indoors if you can")
    } else if i.aqi > 60.0 || i.uv_index >= 9.0 || i.temperature >= 33.0 {
        (Status::Moderate, "Limit time outside")
    } else {
        (Status::Good, "Air is fine for everyone")
    }
}

fn barbecue(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.precipitation_probability >= 50.0 || i.wind_speed >= 30.0 || i.temperature <= 5.0 {
        (Status::Bad, "Not a day for the grill")
    } else if i.precipitation_probability >= 30.0 || i.wind_speed >= 20.0 || i.temperature <= 12.0 {
        (Status::Moderate, "Doable, but keep the cover handy")
    } else {
        (Status::Good, "Fire up the grill")
    }
}

fn fishing(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.wind_speed >= 35.0 || i.precipitation_probability >= 60.0 {
        (Status::Bad, "Rough conditions on the water")
    } else if i.wind_speed >= 20.0 || i.precipitation_probability >= 35.0 {
        (Status::Moderate, "Fishable, watch the wind")
    } else {
        (Status::Good, "Calm water, good fishing")
    }
}

fn car_wash(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.precipitation_probability >= 40.0 {
        (Status::Bad, "Rain would undo the wash")
    } else if i.precipitation_probability >= 20.0 {
        (Status::Moderate, "A shower might pass through")
    } else {
        (Status::Good, "Your car will stay clean")
    }
}

fn gardening(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.precipitation_probability >= 60.0 || i.temperature <= 0.0 || i.wind_speed >= 35.0 {
        (Status::Bad, "Leave the garden for another day")
    } else if i.precipitation_probability >= 35.0 || i.uv_index >= 9.0 || i.temperature <= 6.0 {
        (Status::Moderate, "Work in the cooler hours")
    } else {
        (Status::Good, "Good day to get planting")
    }
}

fn cycling(i: &LifestyleInputs) -> (Status, &'static str) {
    if i.wind_speed >= 35.0 || i.precipitation_probability >= 60.0 || i.temperature <= -2.0 || i.aqi > 100.0 {
        (Status::Bad, "Leave the bike at home")
    } else if i.wind_speed >= 22.0 || i.precipitation_probability >= 35.0 || i.temperature <= 4.0 || i.aqi > 60.0 {
        (Status::Moderate, "Ride carefully, conditions are mixed")
    } else {
        (Status::Good, "Great day for a ride")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> LifestyleInputs {
        LifestyleInputs {
            temperature: 20.0,
            wind_speed: 10.0,
            humidity: 50.0,
            uv_index: 3.0,
            aqi: 30.0,
            precipitation_probability: 10.0,
        }
    }

    fn status_of<'a>(indices: &'a [LifestyleIndex], id: &str) -> &'a LifestyleIndex {
        indices.iter().find(|i| i.id == id).expect("index missing")
    }

    #[test]
    fn test_all_nine_indices_always_produced() {
        let indices = evaluate(neutral());
        let ids: Vec<&str> = indices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "running",
                "outdoor-kids",
                "allergy",
                "sensitive-groups",
                "barbecue",
                "fishing",
                "car-wash",
                "gardening",
                "cycling",
            ]
        );
        for index in &indices {
            assert!(!index.label.is_empty());
            assert!(!index.icon.is_empty());
        }
    }

    #[test]
    fn test_polluted_heat_makes_running_bad() {
        let indices = evaluate(LifestyleInputs {
            aqi: 150.0,
            temperature: 40.0,
            ..neutral()
        });
        assert_eq!(status_of(&indices, "running").status, Status::Bad);
    }

    #[test]
    fn test_mild_clean_day_makes_running_good() {
        let indices = evaluate(LifestyleInputs {
            aqi: 20.0,
            temperature: 18.0,
            wind_speed: 5.0,
            humidity: 40.0,
            ..neutral()
        });
        assert_eq!(status_of(&indices, "running").status, Status::Good);
    }

    #[test]
    fn test_high_aqi_alone_degrades_running() {
        let indices = evaluate(LifestyleInputs {
            aqi: 80.0,
            ..neutral()
        });
        assert_eq!(status_of(&indices, "running").status, Status::Moderate);
    }

    #[test]
    fn test_rain_probability_drives_car_wash() {
        let wet = evaluate(LifestyleInputs {
            precipitation_probability: 55.0,
            ..neutral()
        });
        assert_eq!(status_of(&wet, "car-wash").status, Status::Bad);

        let maybe = evaluate(LifestyleInputs {
            precipitation_probability: 25.0,
            ..neutral()
        });
        assert_eq!(status_of(&maybe, "car-wash").status, Status::Moderate);

        let dry = evaluate(neutral());
        assert_eq!(status_of(&dry, "car-wash").status, Status::Good);
    }

    #[test]
    fn test_dry_wind_raises_allergy_risk() {
        let indices = evaluate(LifestyleInputs {
            wind_speed: 30.0,
            humidity: 30.0,
            ..neutral()
        });
        assert_eq!(status_of(&indices, "allergy").status, Status::Bad);
    }

    #[test]
    fn test_storm_wind_grounds_fishing_and_cycling() {
        let indices = evaluate(LifestyleInputs {
            wind_speed: 40.0,
            ..neutral()
        });
        assert_eq!(status_of(&indices, "fishing").status, Status::Bad);
        assert_eq!(status_of(&indices, "cycling").status, Status::Bad);
    }

    #[test]
    fn test_nan_inputs_fall_back_to_neutral_defaults() {
        let indices = evaluate(LifestyleInputs {
            temperature: f64::NAN,
            wind_speed: f64::NAN,
            humidity: f64::NAN,
            uv_index: f64::NAN,
            aqi: f64::NAN,
            precipitation_probability: f64::NAN,
        });
        assert_eq!(indices.len(), 9);
        // neutral defaults land every index at good except none
        assert_eq!(status_of(&indices, "running").status, Status::Good);
        assert_eq!(status_of(&indices, "car-wash").status, Status::Good);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let inputs = LifestyleInputs {
            aqi: 72.0,
            temperature: 31.0,
            ..neutral()
        };
        assert_eq!(evaluate(inputs), evaluate(inputs));
    }
}
