use tempest_calendar::SimulationWindow;
use tempest_pet::{adjust_pet, deficit, hargreaves_samani};

#[test]
fn realistic_year_is_finite_non_negative_and_seasonal() {
    let dates = SimulationWindow::parse("2023-01-01", "2023-12-31").unwrap().dates();
    let (mut tmax, mut tmin, mut tave) = (Vec::new(), Vec::new(), Vec::new());
    for i in 0..dates.len() {
        let phase = 2.0 * std::f64::consts::PI * (i as f64 - 105.0) / 365.0;
        let hi = 27.0 + 9.0 * phase.sin();
        let lo = 14.0 + 9.0 * phase.sin();
        tmax.push(hi);
        tmin.push(lo);
        tave.push(0.5 * (hi + lo));
    }
    let eto = hargreaves_samani(&dates, &tmax, &tmin, &tave, 29.678).unwrap();
    assert_eq!(eto.len(), 365);
    assert!(eto.iter().all(|v| v.is_finite() && *v >= 0.0));

    let january: f64 = eto[..31].iter().sum::<f64>() / 31.0;
    let july: f64 = eto[181..212].iter().sum::<f64>() / 31.0;
    assert!(july > 2.0 * january, "july {july}, january {january}");
    assert!((4.0..9.0).contains(&july), "july mean {july} mm/day");

    let precip = vec![0.0; 365];
    let pet = adjust_pet(&eto, &precip, 1.0, 1.0).unwrap();
    let d = deficit(&precip, &pet).unwrap();
    assert!(d.iter().all(|v| *v <= 0.0));
}
