use super::*;

#[test]
fn stage_is_released_on_drop() {
    let area = StagingArea::new();
    {
        let stage = area.acquire(16).unwrap();
        assert_eq!(stage.side(), 16);
        assert_eq!(area.stats().live, 1);
    }
    let stats = area.stats();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.acquired, 1);
    assert_eq!(stats.alloc_bytes, 16 * 16 * 4);
}

#[test]
fn stage_is_released_when_work_fails() {
    fn failing(area: &StagingArea) -> FlyerResult<()> {
        let _stage = area.acquire(4)?;
        Err(FlyerError::render("boom"))
    }

    let area = StagingArea::new();
    assert!(failing(&area).is_err());
    assert_eq!(area.stats().live, 0);
}

#[test]
fn peak_tracks_overlapping_stages() {
    let area = StagingArea::new();
    let a = area.acquire(2).unwrap();
    let b = area.acquire(2).unwrap();
    drop(a);
    let c = area.acquire(2).unwrap();
    assert_eq!(area.stats().peak, 2);
    drop((b, c));
    assert_eq!(area.stats().live, 0);
    assert_eq!(area.stats().acquired, 3);
}

#[test]
fn zero_side_is_a_render_error() {
    let area = StagingArea::new();
    assert!(matches!(area.acquire(0), Err(FlyerError::Render(_))));
    assert_eq!(area.stats(), StagingStats::default());
}

#[test]
fn fresh_stage_is_transparent() {
    let area = StagingArea::new();
    let stage = area.acquire(3).unwrap();
    assert!(stage.pixmap().data().iter().all(|&b| b == 0));
}
