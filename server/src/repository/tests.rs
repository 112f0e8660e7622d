//! Repository Integration Tests
//!
//! Tests for the SQLite repositories with an in-memory database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, SortMode, Wish, WishList};
    use crate::repository::{
        init_db, DbState, ListItemPositioningOperations, ListItemRepository, Repository,
        WishListRepository, WishRepository,
    };
    use std::path::PathBuf;

    struct Repos {
        db: DbState,
        wishes: WishRepository,
        lists: WishListRepository,
        items: ListItemRepository,
    }

    async fn setup_test_db() -> Repos {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db = init_db(&db_path).await.expect("Failed to init test DB");
        Repos {
            wishes: WishRepository::new(db.connection()),
            lists: WishListRepository::new(db.connection()),
            items: ListItemRepository::new(db.connection()),
            db,
        }
    }

    async fn list_with_wishes(repos: &Repos, titles: &[&str]) -> (u32, Vec<u32>) {
        let mut list = WishList::new(0, 1, "Birthday".to_string());
        list.sort_mode = SortMode::Custom;
        let list = repos.lists.create(&list).await.unwrap();
        let mut ids = Vec::new();
        for title in titles {
            let wish = repos.wishes.create(&Wish::new(0, 1, title.to_string())).await.unwrap();
            repos.items.add_wish(list.id, wish.id).await.unwrap();
            ids.push(wish.id);
        }
        (list.id, ids)
    }

    async fn custom_order(repos: &Repos, list_id: u32) -> Vec<(u32, f64)> {
        repos
            .items
            .entries(list_id, SortMode::Custom)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.wish.id, e.sort_order))
            .collect()
    }

    async fn set_rank(repos: &Repos, list_id: u32, wish_id: u32, rank: f64) {
        let conn = repos.db.conn.lock().await;
        conn.execute(
            "UPDATE list_items SET sort_order = ? WHERE list_id = ? AND wish_id = ?",
            rusqlite::params![rank, list_id, wish_id],
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_find_wish() {
        let repos = setup_test_db().await;

        let mut wish = Wish::new(0, 1, "  Record player ".to_string());
        wish.price = Some(120.0);
        let created = repos.wishes.create(&wish).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.title, "Record player");
        assert!(created.created_at > 0);

        let found = repos.wishes.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_invalid_wish_rejected() {
        let repos = setup_test_db().await;

        let err = repos.wishes.create(&Wish::new(0, 1, "".to_string())).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_wishes_scoped_by_owner() {
        let repos = setup_test_db().await;

        repos.wishes.create(&Wish::new(0, 1, "Mine".to_string())).await.unwrap();
        repos.wishes.create(&Wish::new(0, 2, "Theirs".to_string())).await.unwrap();

        let mine = repos.wishes.list_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_update_wish() {
        let repos = setup_test_db().await;

        let mut wish = repos.wishes.create(&Wish::new(0, 1, "Original".to_string())).await.unwrap();
        wish.title = "Updated".to_string();
        wish.notes = Some("size M".to_string());

        let updated = repos.wishes.update(&wish).await.expect("Update failed");
        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.notes.as_deref(), Some("size M"));

        wish.id = 999;
        assert!(matches!(repos.wishes.update(&wish).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_sort_mode_persistence() {
        let repos = setup_test_db().await;

        let list = repos.lists.create(&WishList::new(0, 1, "Xmas".to_string())).await.unwrap();
        assert_eq!(list.sort_mode, SortMode::Newest);

        let updated = repos.lists.set_sort_mode(list.id, SortMode::PriceHigh).await.unwrap();
        assert_eq!(updated.sort_mode, SortMode::PriceHigh);

        let found = repos.lists.find_by_id(list.id).await.unwrap().unwrap();
        assert_eq!(found.sort_mode, SortMode::PriceHigh);
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ranks() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c"]).await;

        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![(ids[0], 1.0), (ids[1], 2.0), (ids[2], 3.0)]
        );
    }

    #[tokio::test]
    async fn test_duplicate_membership_rejected() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a"]).await;

        let err = repos.items.add_wish(list_id, ids[0]).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_before_and_between() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["first", "second", "third"]).await;
        let (first, second, third) = (ids[0], ids[1], ids[2]);

        // first = 1.0; second to the head -> 0.0; third between them -> 0.5
        let head = repos.items.move_wish(list_id, second, None, Some(first)).await.unwrap();
        assert_eq!(head.sort_order, 0.0);

        let middle = repos.items.move_wish(list_id, third, Some(second), Some(first)).await.unwrap();
        assert_eq!(middle.sort_order, 0.5);
        assert!(!middle.renumbered);

        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![(second, 0.0), (third, 0.5), (first, 1.0)]
        );
    }

    #[tokio::test]
    async fn test_move_renumbers_exhausted_gap() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c"]).await;
        set_rank(&repos, list_id, ids[0], 0.0).await;
        set_rank(&repos, list_id, ids[1], 1e-7).await;

        let placement = repos.items.move_wish(list_id, ids[2], Some(ids[0]), Some(ids[1])).await.unwrap();

        assert!(placement.renumbered);
        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![(ids[0], 0.0), (ids[2], 5.0), (ids[1], 10.0)]
        );
    }

    #[tokio::test]
    async fn test_move_with_stale_neighbours_rejected() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c"]).await;

        let err = repos.items.move_wish(list_id, ids[0], Some(ids[2]), Some(ids[1])).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(custom_order(&repos, list_id).await[0], (ids[0], 1.0));
    }

    #[tokio::test]
    async fn test_move_requires_custom_mode() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b"]).await;
        repos.lists.set_sort_mode(list_id, SortMode::Title).await.unwrap();

        let err = repos.items.move_wish(list_id, ids[1], None, Some(ids[0])).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(custom_order(&repos, list_id).await[0], (ids[0], 1.0));
    }

    #[tokio::test]
    async fn test_move_to_unrelated_tail_rejected() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c", "d"]).await;

        let err = repos.items.move_wish(list_id, ids[3], Some(ids[0]), None).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![(ids[0], 1.0), (ids[1], 2.0), (ids[2], 3.0), (ids[3], 4.0)]
        );
    }

    #[tokio::test]
    async fn test_renumber_five_items() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c", "d", "e"]).await;
        repos.items.move_wish(list_id, ids[4], None, Some(ids[0])).await.unwrap();

        let count = repos.items.renumber_list(list_id).await.unwrap();

        assert_eq!(count, 5);
        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![
                (ids[4], 0.0),
                (ids[0], 10.0),
                (ids[1], 20.0),
                (ids[2], 30.0),
                (ids[3], 40.0)
            ]
        );

        // a second pass changes nothing
        repos.items.renumber_list(list_id).await.unwrap();
        assert_eq!(custom_order(&repos, list_id).await[0], (ids[4], 0.0));
    }

    #[tokio::test]
    async fn test_failed_renumber_rolls_back() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c"]).await;
        let before = custom_order(&repos, list_id).await;

        {
            let conn = repos.db.conn.lock().await;
            conn.execute_batch(&format!(
                "CREATE TRIGGER fail_last BEFORE UPDATE OF sort_order ON list_items
                 WHEN NEW.wish_id = {} BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
                ids[2]
            ))
            .unwrap();
        }

        let err = repos.items.renumber_list(list_id).await.unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        assert_eq!(custom_order(&repos, list_id).await, before);
    }

    #[tokio::test]
    async fn test_initialize_custom_order_from_display_order() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["banana", "apple", "cherry"]).await;

        let count = repos.items.initialize_custom_order(list_id, SortMode::Title).await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            custom_order(&repos, list_id).await,
            vec![(ids[1], 0.0), (ids[0], 10.0), (ids[2], 20.0)]
        );
        let list = repos.lists.find_by_id(list_id).await.unwrap().unwrap();
        assert_eq!(list.sort_mode, SortMode::Custom);
    }

    #[tokio::test]
    async fn test_remove_and_cascade() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b", "c"]).await;

        repos.items.remove_wish(list_id, ids[0]).await.unwrap();
        assert!(repos.items.find(list_id, ids[0]).await.unwrap().is_none());
        assert!(matches!(
            repos.items.remove_wish(list_id, ids[0]).await,
            Err(DomainError::NotFound(_))
        ));

        // deleting a wish drops its memberships
        repos.wishes.delete(ids[1]).await.unwrap();
        assert_eq!(custom_order(&repos, list_id).await, vec![(ids[2], 3.0)]);

        // deleting the list drops the rest
        repos.lists.delete(list_id).await.unwrap();
        assert!(repos.items.find(list_id, ids[2]).await.unwrap().is_none());
        assert!(repos.wishes.find_by_id(ids[2]).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_membership() {
        let repos = setup_test_db().await;
        let (list_id, ids) = list_with_wishes(&repos, &["a", "b"]).await;

        let item = repos.items.find(list_id, ids[1]).await.unwrap().unwrap();
        assert_eq!(item.wish_id, ids[1]);
        assert_eq!(item.sort_order, 2.0);
        assert!(item.seq > 0);
    }
}
