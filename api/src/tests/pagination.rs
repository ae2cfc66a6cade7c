use crate::social::PageRequest;

#[test]
fn offset_is_stable_for_huge_page_numbers() {
    // A page far beyond any result set must yield a valid offset, not wrap.
    let page = PageRequest::new(u32::MAX, 100);
    assert_eq!(page.offset(), (u32::MAX as i64 - 1) * 100);
    assert!(page.offset() >= 0);
}

#[test]
fn page_and_size_are_clamped() {
    let page = PageRequest::new(0, 0);
    assert_eq!(page.offset(), 0);
    assert_eq!(page.limit(), 1);

    let page = PageRequest::new(1, 10_000);
    assert_eq!(page.limit(), PageRequest::MAX_PAGE_SIZE as i64);
}

#[test]
fn slice_past_the_end_is_empty() {
    let items = [1, 2, 3];
    assert_eq!(PageRequest::new(2, 2).slice(&items), [3]);
    assert!(PageRequest::new(3, 2).slice(&items).is_empty());
    assert!(PageRequest::new(u32::MAX, 100).slice(&items).is_empty());
}
