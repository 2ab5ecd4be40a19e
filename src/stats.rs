//! Estatísticas Agregadas de Tempo de Execução

use crate::types::LocationRecord;
use std::sync::Arc;

/// Mais rápido, mais lento e média (ms) sobre todos os registros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub fastest: u64,
    pub slowest: u64,
    pub average: f64,
}

/// Calcula as estatísticas da sequência.
///
/// Sequência vazia resulta em tudo zero. A média não é arredondada.
pub fn calculate_stats(results: &[LocationRecord]) -> Stats {
    if results.is_empty() {
        return Stats::default();
    }

    let mut fastest = u64::MAX;
    let mut slowest = 0u64;
    let mut total = 0u128;

    for record in results {
        fastest = fastest.min(record.execution_time);
        slowest = slowest.max(record.execution_time);
        total += record.execution_time as u128;
    }

    Stats {
        fastest,
        slowest,
        average: total as f64 / results.len() as f64,
    }
}

/// Cache das estatísticas, chaveado pela identidade da sequência.
///
/// Guarda o próprio `Arc` (não só o ponteiro) para que o endereço não seja
/// reaproveitado por outra sequência enquanto estiver no cache.
#[derive(Debug, Default)]
pub struct StatsMemo {
    key: Option<Arc<Vec<LocationRecord>>>,
    stats: Stats,
    #[cfg(test)]
    recomputations: u64,
}

impl StatsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna as estatísticas, recalculando só se a sequência mudou.
    pub fn get(&mut self, results: &Arc<Vec<LocationRecord>>) -> Stats {
        let fresh = match &self.key {
            Some(key) => Arc::ptr_eq(key, results),
            None => false,
        };

        if !fresh {
            self.stats = calculate_stats(results);
            self.key = Some(Arc::clone(results));
            #[cfg(test)]
            {
                self.recomputations += 1;
            }
        }

        self.stats
    }

    #[cfg(test)]
    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{seed_records, Address};
    use proptest::prelude::*;

    fn record(execution_time: u64) -> LocationRecord {
        LocationRecord {
            timestamp: 0,
            address: Address::new("Elm St", "Shelbyville"),
            execution_time,
        }
    }

    #[test]
    fn empty_sequence_is_all_zero() {
        let stats = calculate_stats(&[]);
        assert_eq!(stats.fastest, 0);
        assert_eq!(stats.slowest, 0);
        assert_eq!(stats.average, 0.0);
    }

    #[test]
    fn seed_records_stats() {
        let stats = calculate_stats(&seed_records(0));
        assert_eq!(
            stats,
            Stats {
                fastest: 400,
                slowest: 900,
                average: 650.0
            }
        );
    }

    #[test]
    fn average_is_not_rounded() {
        let stats = calculate_stats(&[record(1), record(2), record(2)]);
        assert!((stats.average - 5.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn memo_recomputes_only_on_new_sequence() {
        let mut memo = StatsMemo::new();
        let first = Arc::new(seed_records(0));

        memo.get(&first);
        memo.get(&first);
        assert_eq!(memo.recomputations(), 1);

        // Mesmo conteúdo, outra sequência: recalcula
        let copy = Arc::new(first.as_ref().clone());
        memo.get(&copy);
        assert_eq!(memo.recomputations(), 2);

        let mut grown = copy.as_ref().clone();
        grown.push(record(100));
        let grown = Arc::new(grown);
        assert_eq!(memo.get(&grown).fastest, 100);
        assert_eq!(memo.recomputations(), 3);
    }

    proptest! {
        #[test]
        fn fastest_le_average_le_slowest(times in prop::collection::vec(0u64..10_000_000, 1..64)) {
            let records: Vec<_> = times.iter().copied().map(record).collect();
            let stats = calculate_stats(&records);
            prop_assert!(stats.fastest as f64 <= stats.average);
            prop_assert!(stats.average <= stats.slowest as f64);
            prop_assert_eq!(stats.fastest, *times.iter().min().unwrap());
            prop_assert_eq!(stats.slowest, *times.iter().max().unwrap());
        }
    }
}
