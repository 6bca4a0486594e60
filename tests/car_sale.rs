//! The used-car sale model: year, mileage and engine power decide the
//! probability (in percentage points) that a car sells.

use fuzzy_mamdani::{
    fuzzy_and, is, membership_at, Antecedent, DefuzzificationOp, Inputs, ModelConfig, Shape, UniverseRange,
    VariableConfig,
};

fn not(variable: &str, others: [&str; 2]) -> Antecedent {
    Antecedent::any(others.map(|term| is(variable, term)))
}

fn car_model() -> ModelConfig {
    let year = VariableConfig::new("year", UniverseRange::new(1990., 2020., 1.))
        .term("old", Shape::trapezoidal(1990., 1990., 2000., 2005.))
        .term("average", Shape::trapezoidal(2000., 2005., 2010., 2015.))
        .term("new", Shape::trapezoidal(2010., 2015., 2020., 2020.));
    let mileage = VariableConfig::new("mileage", UniverseRange::new(50_000., 500_000., 1.))
        .term("low", Shape::trapezoidal(50_000., 50_000., 150_000., 200_000.))
        .term("average", Shape::trapezoidal(150_000., 200_000., 300_000., 350_000.))
        .term("high", Shape::trapezoidal(300_000., 350_000., 500_000., 500_000.));
    let power = VariableConfig::new("power", UniverseRange::new(80., 300., 1.))
        .term("low", Shape::trapezoidal(80., 80., 100., 150.))
        .term("medium", Shape::trapezoidal(100., 150., 170., 220.))
        .term("high", Shape::trapezoidal(170., 220., 300., 300.));
    let sold = VariableConfig::new("sold", UniverseRange::new(0., 101., 1.))
        .term("low", Shape::trapezoidal(0., 0., 20., 40.))
        .term("average", Shape::triangular(20., 50., 80.))
        .term("high", Shape::trapezoidal(60., 85., 100., 100.));

    let not_old = || not("year", ["average", "new"]);
    let not_new = || not("year", ["old", "average"]);
    let not_low_power = || not("power", ["medium", "high"]);
    let not_high_power = || not("power", ["low", "medium"]);
    let not_high_mileage = || not("mileage", ["low", "average"]);

    ModelConfig::new(sold)
        .input(year)
        .input(mileage)
        .input(power)
        // Unlikely to sell
        .rule(is("year", "old").and(is("mileage", "high")), "low")
        .rule(is("year", "old").and(is("power", "low")), "low")
        .rule(is("mileage", "low").and(is("power", "low")), "low")
        // Average chance
        .rule(not_old().and(not_high_power()), "average")
        .rule(not_new().and(not_low_power()), "average")
        .rule(not_new().and(not_high_mileage()), "average")
        .rule(is("year", "average").and(is("mileage", "average")), "average")
        .rule(is("power", "medium").and(is("year", "average")), "average")
        // Likely to sell
        .rule(is("year", "new").and(is("power", "high")), "high")
        .rule(is("power", "high").and(is("mileage", "low")), "high")
        .rule(is("year", "new").and(is("mileage", "low")), "high")
}

#[test]
fn test_input_degrees() {
    let model = car_model().build().unwrap();
    let year = model.inputs().by_name("year").unwrap();
    let mileage = model.inputs().by_name("mileage").unwrap();

    let year_new = membership_at(year.universe(), year.term("new").unwrap(), 2016.).unwrap();
    let mileage_low = membership_at(mileage.universe(), mileage.term("low").unwrap(), 250_000.).unwrap();

    assert_eq!(year_new, 1.);
    assert_eq!(mileage_low, 0.);
    // New car with low mileage doesn't fire
    assert_eq!(fuzzy_and([year_new, mileage_low]), 0.);
}

#[test]
fn test_new_powerful_car() {
    let model = car_model().build().unwrap();
    let inputs = Inputs::new()
        .with("year", 2016.)
        .with("mileage", 250_000.)
        .with("power", 260.);
    let outputs = model.infer(&inputs).unwrap();

    assert_eq!(outputs.activation("low"), Some(0.));
    assert_eq!(outputs.activation("average"), Some(0.));
    assert_eq!(outputs.activation("high"), Some(1.));
    assert_eq!(outputs.aggregated(), model.output().term("high").unwrap());

    let result = outputs.defuzzified();

    assert!((result.centroid - 85.57142857142857).abs() < 1e-9);
    assert_eq!(result.bisector, 86.);
    assert_eq!(result.mean_of_maximum, 92.5);
    assert_eq!(result.min_of_maximum, 85.);
    assert_eq!(result.max_of_maximum, 100.);
    assert_eq!(outputs.get(DefuzzificationOp::Som), 85.);

    // Height of the aggregated set under the centroid line
    let height = outputs.membership_at(result.centroid);
    assert!(height > 0.99 && height <= 1.);

    assert_eq!(outputs.aggregated().points().count(), 101);
}

#[test]
fn test_new_car_with_high_mileage() {
    let model = car_model().build().unwrap();
    let inputs = Inputs::new()
        .with("year", 2016.)
        .with("mileage", 400_000.)
        .with("power", 260.);
    let outputs = model.infer(&inputs).unwrap();

    // The "unlikely" rules need an old car, so high mileage alone doesn't fire them
    assert_eq!(outputs.activation("low"), Some(0.));
    assert_eq!(outputs.activation("average"), Some(0.));
    assert_eq!(outputs.activation("high"), Some(1.));
    assert_eq!(outputs.aggregated(), model.output().term("high").unwrap());
    assert_eq!(outputs.get(DefuzzificationOp::Som), 85.);
    assert!((outputs.get(DefuzzificationOp::Centroid) - 85.57142857142857).abs() < 1e-9);
}

#[test]
fn test_average_car() {
    let model = car_model().build().unwrap();
    let inputs = Inputs::new()
        .with("year", 2008.)
        .with("mileage", 250_000.)
        .with("power", 160.);
    let outputs = model.infer(&inputs).unwrap();

    assert_eq!(outputs.activation("low"), Some(0.));
    assert_eq!(outputs.activation("average"), Some(1.));
    assert_eq!(outputs.activation("high"), Some(0.));

    let result = outputs.defuzzified();

    assert!((result.centroid - 50.).abs() < 1e-9);
    assert_eq!(result.bisector, 50.);
    assert_eq!(result.mean_of_maximum, 50.);
    assert_eq!(result.min_of_maximum, 50.);
    assert_eq!(result.max_of_maximum, 50.);
}

#[test]
fn test_partial_activation() {
    let model = car_model().build().unwrap();
    // Year 2012: average 0.6, new 0.4. Mileage 175k: low 0.5, average 0.5.
    let inputs = Inputs::new()
        .with("year", 2012.)
        .with("mileage", 175_000.)
        .with("power", 260.);
    let fuzzified = model.fuzzify(&inputs).unwrap();

    assert!((fuzzified.get("year", "average").unwrap() - 0.6).abs() < 1e-12);
    assert!((fuzzified.get("year", "new").unwrap() - 0.4).abs() < 1e-12);
    assert_eq!(fuzzified.get("mileage", "low"), Some(0.5));

    let outputs = model.infer(&inputs).unwrap();
    let high = outputs.activation("high").unwrap();
    let average = outputs.activation("average").unwrap();

    // new AND high power = 0.4, high power AND low mileage = 0.5
    assert_eq!(high, 0.5);
    // not new AND not low power = min(0.6, 1.0)
    assert!((average - 0.6).abs() < 1e-12);
    assert_eq!(outputs.activation("low"), Some(0.));

    let result = outputs.defuzzified();

    assert!(result.min_of_maximum <= result.mean_of_maximum);
    assert!(result.mean_of_maximum <= result.max_of_maximum);
    assert!(result.centroid > 20. && result.centroid < 100.);
}
