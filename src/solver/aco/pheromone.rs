use crate::solver::aco::space::ParameterSpace;

/// Pheromone trails and static heuristic desirability, indexed
/// `[parameter][step]`. Row `p` has `slot_count()` entries of dimension `p`.
#[derive(Debug, Clone)]
pub struct PheromoneModel {
    pheromone: Vec<Vec<f64>>,
    heuristic: Vec<Vec<f64>>,
}

impl PheromoneModel {
    /// Every trail starts at `tau0`; the heuristic favours values near the
    /// midpoint of each range and never changes afterwards.
    pub fn new(space: &ParameterSpace, tau0: f64) -> Self {
        let pheromone = space.iter().map(|b| vec![tau0; b.slot_count()]).collect();

        let heuristic = space
            .iter()
            .map(|b| {
                let middle = b.midpoint();
                (0..b.slot_count())
                    .map(|k| 1.0 / (1.0 + (b.value(k) - middle).abs()))
                    .collect()
            })
            .collect();

        Self {
            pheromone,
            heuristic,
        }
    }

    pub fn pheromone(&self, param: usize) -> &[f64] {
        &self.pheromone[param]
    }

    pub fn heuristic(&self, param: usize) -> &[f64] {
        &self.heuristic[param]
    }

    /// τ^α · η^β for every step of `param`.
    pub fn desirability(&self, param: usize, alpha: f64, beta: f64) -> Vec<f64> {
        self.pheromone[param]
            .iter()
            .zip(&self.heuristic[param])
            .map(|(tau, eta)| tau.powf(alpha) * eta.powf(beta))
            .collect()
    }

    pub fn evaporate(&mut self, evaporation_rate: f64) {
        let keep = 1.0 - evaporation_rate;
        for row in &mut self.pheromone {
            for tau in row.iter_mut() {
                *tau *= keep;
            }
        }
    }

    pub fn deposit(&mut self, param: usize, step: usize, amount: f64) {
        if let Some(tau) = self.pheromone.get_mut(param).and_then(|row| row.get_mut(step)) {
            *tau += amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ParamBounds;

    fn space() -> ParameterSpace {
        ParameterSpace::new(vec![
            ParamBounds {
                min: 120.0,
                max: 140.0,
                discretization: 1.0,
            },
            ParamBounds {
                min: 0.01,
                max: 0.03,
                discretization: 0.001,
            },
        ])
    }

    #[test]
    fn test_rows_sized_by_slot_count() {
        let model = PheromoneModel::new(&space(), 0.5);
        assert_eq!(model.pheromone(0).len(), 21);
        assert_eq!(model.heuristic(1).len(), 21);
        assert!(model.pheromone(0).iter().all(|&t| t == 0.5));
    }

    #[test]
    fn test_heuristic_peaks_at_midpoint() {
        let model = PheromoneModel::new(&space(), 0.5);
        let row = model.heuristic(0);
        assert_eq!(row[10], 1.0);
        assert_eq!(row[0], 1.0 / 11.0);
        assert_eq!(row[0], row[20]);
        assert!(row[9] > row[8]);
    }

    #[test]
    fn test_evaporation_without_deposit_decays_geometrically() {
        let mut model = PheromoneModel::new(&space(), 0.5);
        let mut expected = 0.5;
        for _ in 0..5000 {
            model.evaporate(0.2);
            expected *= 0.8;
            for p in 0..2 {
                for &tau in model.pheromone(p) {
                    assert!(tau >= 0.0);
                    assert_eq!(tau, expected);
                }
            }
        }
        assert!(model.pheromone(0)[0] < 1e-300);
    }

    #[test]
    fn test_full_evaporation_reaches_zero_not_below() {
        let mut model = PheromoneModel::new(&space(), 0.5);
        model.evaporate(1.0);
        assert!(model.pheromone(1).iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_deposit_targets_one_entry() {
        let mut model = PheromoneModel::new(&space(), 0.5);
        model.deposit(1, 3, 0.25);
        assert_eq!(model.pheromone(1)[3], 0.75);
        assert_eq!(model.pheromone(1)[2], 0.5);
        // Out of range is ignored.
        model.deposit(5, 0, 1.0);
        model.deposit(0, 99, 1.0);
    }

    #[test]
    fn test_desirability_combines_both_matrices() {
        let model = PheromoneModel::new(&space(), 0.5);
        let d = model.desirability(0, 1.5, 2.0);
        let expected = 0.5f64.powf(1.5) * (1.0f64 / 11.0).powf(2.0);
        assert!((d[0] - expected).abs() < 1e-15);
    }
}
