//! Similarity-based duplicate rejection.

use tracing::debug;

use crate::similarity::similarity;

/// True if `candidate` scores strictly above `threshold` against any accepted text.
pub fn is_duplicate<S: AsRef<str>>(candidate: &str, accepted: &[S], threshold: f64) -> bool {
    accepted.iter().any(|x| similarity(candidate, x.as_ref()) > threshold)
}

/// Accumulates items, admitting each only if it is not a duplicate of one
/// already admitted.
#[derive(Debug, Clone)]
pub struct DedupFilter<T> {
    threshold: f64,
    accepted: Vec<T>,
}

impl<T: AsRef<str>> DedupFilter<T> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            accepted: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_duplicate(&self, candidate: &str) -> bool {
        is_duplicate(candidate, &self.accepted, self.threshold)
    }

    /// Stores `item` and hands it back, or drops it and returns `None` when
    /// it duplicates an admitted item.
    pub fn admit(&mut self, item: T) -> Option<&T> {
        if self.is_duplicate(item.as_ref()) {
            return None;
        }
        self.accepted.push(item);
        self.accepted.last()
    }

    pub fn accepted(&self) -> &[T] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.accepted
    }
}

/// Single in-order pass keeping the first item of every similar cluster.
pub fn dedup<T: AsRef<str>>(items: Vec<T>, threshold: f64) -> Vec<T> {
    let total = items.len();
    let mut filter = DedupFilter::new(threshold);
    for item in items {
        filter.admit(item);
    }
    let removed = total - filter.len();
    if removed > 0 {
        debug!("🧹 Deduplication removed {} of {} items (threshold {:.2})", removed, total, threshold);
    }
    filter.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SIMILARITY_THRESHOLD;

    const BRIDGE: &str = "서울시는 16일 한강 다리 재건축 사업에 120억 원을 투입한다고 밝혔다. 공사는 내년 3월 착공해 2026년 말 완공할 계획이며 시는 공사 기간 우회 도로 두 곳을 운영하기로 했다.";
    const BRIDGE_AGAIN: &str = "서울시는 16일 한강 다리 재건축 사업에 120억 원을 투입한다고 밝혔다. 공사는 내년 3월 착공해 2026년 말 완공할 계획이며 시는 공사 기간 우회 도로 두 곳을 운영하기로 했다!";
    const BRIDGE_REWORDED: &str = "서울시는 16일 한강 다리 재건축 사업에 120억 원을 투입한다고 발표했다. 공사는 내년 3월 착공해 2026년 말 완공할 계획이고 시는 공사 기간 동안 우회 도로 두 곳을 운영한다.";
    const FESTIVAL: &str = "부산 해운대 불꽃축제에 관람객 100만 명이 몰렸다. 주최 측은 안전요원 1200명을 배치했고 인근 도로는 밤늦게까지 정체를 빚었다.";
    const SNOW: &str = "폭설로 김포공항 항공편 40여 편이 결항됐다. 강원 산간에는 최대 30cm의 눈이 쌓여 농가 비닐하우스가 무너졌다.";

    #[test]
    fn test_trailing_punctuation_is_duplicate() {
        assert!(is_duplicate(BRIDGE_AGAIN, &[BRIDGE], SIMILARITY_THRESHOLD));
        assert!(is_duplicate(BRIDGE_REWORDED, &[BRIDGE], SIMILARITY_THRESHOLD));
    }

    #[test]
    fn test_shared_keyword_is_not_duplicate() {
        let a = "서울시는 16일 한강 다리 재건축 사업에 120억 원을 투입한다고 밝혔다.";
        let b = "폭설로 서울 김포공항 항공편 40여 편이 결항됐고 강원 산간에는 눈이 30cm 쌓였다.";
        assert!(!is_duplicate(a, &[b], SIMILARITY_THRESHOLD));
        assert!(!is_duplicate(FESTIVAL, &[BRIDGE, SNOW], SIMILARITY_THRESHOLD));
    }

    #[test]
    fn test_empty_accepted_set() {
        let none: [&str; 0] = [];
        assert!(!is_duplicate(BRIDGE, &none, SIMILARITY_THRESHOLD));
    }

    #[test]
    fn test_filter_admits_first_of_cluster() {
        let mut filter = DedupFilter::new(SIMILARITY_THRESHOLD);
        assert_eq!(filter.admit(BRIDGE), Some(&BRIDGE));
        assert!(filter.admit(BRIDGE_AGAIN).is_none());
        assert!(filter.admit(FESTIVAL).is_some());
        assert!(filter.admit(BRIDGE_REWORDED).is_none());
        assert!(filter.admit(SNOW).is_some());
        assert_eq!(filter.accepted(), &[BRIDGE, FESTIVAL, SNOW]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let items = vec![BRIDGE, FESTIVAL, BRIDGE_AGAIN, SNOW, BRIDGE_REWORDED];
        let once = dedup(items, SIMILARITY_THRESHOLD);
        assert_eq!(once, vec![BRIDGE, FESTIVAL, SNOW]);
        let twice = dedup(once.clone(), SIMILARITY_THRESHOLD);
        assert_eq!(once, twice);
    }
}
