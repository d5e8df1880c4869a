use rand::Rng;

use crate::error::ValidationError;
use crate::io::round4;
use crate::model::entity::Score;
use crate::model::instance::ProblemInstance;

/// Random test instance: everyone likes themselves fully, every other
/// affinity is uniform in `[0, 1]` rounded to four decimals.
pub fn random_instance<R: Rng>(
    person_count: usize,
    table_count: usize,
    rng: &mut R,
) -> Result<ProblemInstance, ValidationError> {
    ProblemInstance::check_counts(person_count, table_count)?;
    let affinity = (0..person_count)
        .map(|from| {
            (0..person_count)
                .map(|to| if from == to { 1.0 } else { round4(rng.gen::<Score>()) })
                .collect::<Vec<Score>>()
        })
        .collect();
    ProblemInstance::new(person_count, table_count, affinity)
}
