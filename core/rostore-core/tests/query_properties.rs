//! Query 컴파일 속성 테스트

use proptest::prelude::*;
use rostore_core::query::{Arg, Modifier, Query, QueryKind, compile, compiler::range_end};

fn arb_token() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

fn arb_bound_modifier() -> impl Strategy<Value = Modifier> {
    prop_oneof![
        (-1000i64..1000).prop_map(|v| Modifier::Gt(v.into())),
        (-1000i64..1000).prop_map(|v| Modifier::GtEq(v.into())),
        (-1000i64..1000).prop_map(|v| Modifier::Lt(v.into())),
        (-1000i64..1000).prop_map(|v| Modifier::LtEq(v.into())),
        (-1000i64..1000).prop_map(|v| Modifier::Eq(v.into())),
    ]
}

fn arb_query() -> impl Strategy<Value = Query> {
    (
        prop::collection::vec(arb_token(), 1..4),
        prop::option::of("[a-z]{1,4}"),
        prop::collection::vec(arb_bound_modifier(), 0..3),
        prop::option::of(-1i64..50),
        prop::option::of(0i64..50),
        any::<bool>(),
    )
        .prop_map(|(tokens, prefix, bounds, limit, offset, reverse)| {
            let mut mods = vec![Modifier::Key(tokens)];
            mods.extend(prefix.map(Modifier::KeyPrefix));
            mods.extend(bounds);
            mods.extend(limit.map(Modifier::Limit));
            mods.extend(offset.map(Modifier::Offset));
            if reverse {
                mods.push(Modifier::Reverse);
            }
            Query::from_modifiers(mods)
        })
}

proptest! {
    #[test]
    fn prop_list_command_shape(query in arb_query()) {
        let cmd = compile(QueryKind::List, &query).unwrap();
        let key = query.key.build().unwrap();
        prop_assert_eq!(cmd.key(), Some(&Arg::Str(key)));

        if query.is_scored() {
            let expected = if query.reverse { "ZREVRANGEBYSCORE" } else { "ZRANGEBYSCORE" };
            prop_assert_eq!(cmd.name, expected);
            let paginated = query.offset != 0 || query.limit != -1;
            prop_assert_eq!(cmd.args.len(), if paginated { 6 } else { 3 });
            if paginated {
                prop_assert_eq!(&cmd.args[3], &Arg::from("LIMIT"));
                prop_assert_eq!(&cmd.args[4], &Arg::Int(query.offset));
                prop_assert_eq!(&cmd.args[5], &Arg::Int(query.limit));
            }
        } else {
            let expected = if query.reverse { "ZREVRANGE" } else { "ZRANGE" };
            prop_assert_eq!(cmd.name, expected);
            prop_assert_eq!(cmd.args.len(), 3);
            prop_assert_eq!(&cmd.args[1], &Arg::Int(query.offset));
            prop_assert_eq!(&cmd.args[2], &Arg::Int(range_end(query.offset, query.limit)));
        }
    }

    #[test]
    fn prop_count_ignores_pagination(query in arb_query()) {
        let cmd = compile(QueryKind::Count, &query).unwrap();
        let plain = Query {
            limit: -1,
            offset: 0,
            reverse: false,
            ..query.clone()
        };
        prop_assert_eq!(&cmd, &compile(QueryKind::Count, &plain).unwrap());
        prop_assert_eq!(cmd.name, if query.is_scored() { "ZCOUNT" } else { "ZCARD" });
    }

    #[test]
    fn prop_reverse_toggles(query in arb_query()) {
        let twice = query.clone().reverse().reverse();
        prop_assert_eq!(twice.reverse, query.reverse);
        prop_assert_eq!(
            compile(QueryKind::List, &twice).unwrap(),
            compile(QueryKind::List, &query).unwrap()
        );
    }

    #[test]
    fn prop_range_end_covers_limit(offset in 0i64..i64::MAX / 2, limit in 1i64..i64::MAX / 2) {
        prop_assert_eq!(range_end(offset, limit) - offset + 1, limit);
    }

    #[test]
    fn prop_range_end_saturates(offset in 0i64..=i64::MAX, limit in 1i64..=i64::MAX) {
        let end = range_end(offset, limit);
        prop_assert!(end >= offset);
        prop_assert_eq!(end, offset.checked_add(limit - 1).unwrap_or(i64::MAX));
        let query = Query::new().key("k").offset(offset).limit(limit);
        prop_assert!(compile(QueryKind::List, &query).is_ok());
    }

    #[test]
    fn prop_eq_is_gt_eq_plus_lt_eq(query in arb_query(), v in -1000i64..1000, reverse in any::<bool>()) {
        let base = if reverse { query.reverse() } else { query };
        let eq = base.clone().eq(v);
        let both = base.gt_eq(v).lt_eq(v);
        for kind in [QueryKind::List, QueryKind::Count] {
            prop_assert_eq!(compile(kind, &eq).unwrap(), compile(kind, &both).unwrap());
        }
    }

    #[test]
    fn prop_single_min_bounds(tokens in prop::collection::vec(arb_token(), 1..4), v in -1000i64..1000, exclusive in any::<bool>()) {
        let base = Query::from_modifiers([Modifier::Key(tokens)]);
        let (query, min) = if exclusive {
            (base.gt(v), Arg::Str(format!("({v}")))
        } else {
            (base.gt_eq(v), Arg::Int(v))
        };
        let key = query.key.build().unwrap();
        let inf = Arg::from("+inf");

        let cmd = compile(QueryKind::List, &query).unwrap();
        prop_assert_eq!(cmd.name, "ZRANGEBYSCORE");
        prop_assert_eq!(&cmd.args, &vec![Arg::Str(key.clone()), min.clone(), inf.clone()]);

        let cmd = compile(QueryKind::List, &query.clone().reverse()).unwrap();
        prop_assert_eq!(cmd.name, "ZREVRANGEBYSCORE");
        prop_assert_eq!(&cmd.args, &vec![Arg::Str(key.clone()), inf.clone(), min.clone()]);

        let cmd = compile(QueryKind::Count, &query).unwrap();
        prop_assert_eq!(cmd.name, "ZCOUNT");
        prop_assert_eq!(&cmd.args, &vec![Arg::Str(key), min, inf]);
    }

    #[test]
    fn prop_last_modifier_wins(a in -100i64..100, b in -100i64..100) {
        let query = Query::new().key("k").gt(a).gt_eq(b);
        let expected = Query::new().key("k").gt_eq(b);
        prop_assert_eq!(query, expected);
    }
}
