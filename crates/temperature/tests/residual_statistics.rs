use rand::SeedableRng;
use rand::rngs::StdRng;
use tempest_params::{Vec2, frio};
use tempest_temperature::{ResidualModel, stationary_moments};

// ---------------------------------------------------------------------------
// Long-run moments of the residual process
// ---------------------------------------------------------------------------

#[test]
fn sample_moments_match_stationary_moments() {
    let (a, b) = (frio::residual_a(), frio::residual_b());
    let (m0, m1) = stationary_moments(&a, &b).unwrap();
    let model = ResidualModel::new(a, b, None).unwrap();

    let n = 200_000;
    let mut rng = StdRng::seed_from_u64(42);
    let mut r = Vec2::zeros();
    // Burn-in.
    for _ in 0..100 {
        r = model.step(&r, &mut rng).unwrap();
    }
    let mut lag0 = [[0.0; 2]; 2];
    let mut lag1 = [[0.0; 2]; 2];
    for _ in 0..n {
        let next = model.step(&r, &mut rng).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                lag0[i][j] += next[i] * next[j];
                lag1[i][j] += next[i] * r[j];
            }
        }
        r = next;
    }
    for i in 0..2 {
        for j in 0..2 {
            let c0 = lag0[i][j] / n as f64;
            let c1 = lag1[i][j] / n as f64;
            assert!(
                (c0 - m0.get(i, j)).abs() < 0.05,
                "lag-0 [{i}][{j}]: sample {c0}, theory {}",
                m0.get(i, j)
            );
            assert!(
                (c1 - m1.get(i, j)).abs() < 0.05,
                "lag-1 [{i}][{j}]: sample {c1}, theory {}",
                m1.get(i, j)
            );
        }
    }
}

#[test]
fn clipped_residuals_never_exceed_clip() {
    let model = ResidualModel::new(frio::residual_a(), frio::residual_b(), Some(2.0)).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut r = Vec2::zeros();
    for _ in 0..20_000 {
        r = model.step(&r, &mut rng).unwrap();
        assert!(r[0].abs() <= 2.0 && r[1].abs() <= 2.0);
    }
}
