use rayon::prelude::*;

use crate::{
    descriptor::param_list,
    resolver::{ClassInfo, DeclaredMemberRc, MatchOutcome, MemberKind, Query},
};

/// Two-tier member matching
///
/// Candidates are narrowed first by kind and name, then, only if that is not enough, by
/// descriptor. The resolver holds no state; every call is independent and may run on any
/// thread.
pub struct SymbolResolver;

impl SymbolResolver {
    /// Find the member of a class that a query refers to
    ///
    /// 1. Keep members with the queried kind and name; none left is `NotFound`.
    /// 2. A single candidate is accepted right away unless the query is strict and carries a
    ///    descriptor.
    /// 3. Without descriptor, several candidates are `Ambiguous`.
    /// 4. A field candidate has its descriptor verified; a mismatch is `NotFound`.
    /// 5. Method candidates are compared by full descriptor (strict) or by parameter list,
    ///    ignoring ASCII case (non-strict).
    /// 6. Exactly one survivor is `Found`; otherwise `NotFound` or `Ambiguous`.
    ///
    /// ## Arguments
    /// * 'parent'  - Internal name of the searched class, used in the outcome
    /// * 'members' - The members the class declares
    /// * 'query'   - What to look for
    pub fn resolve<'a, I>(parent: &str, members: I, query: &Query) -> MatchOutcome
    where
        I: IntoIterator<Item = &'a DeclaredMemberRc>,
    {
        let candidates: Vec<&DeclaredMemberRc> = members
            .into_iter()
            .filter(|member| member.kind == query.kind && member.name == query.name)
            .collect();

        if candidates.is_empty() {
            return Self::not_found(parent, query);
        }

        if candidates.len() == 1 && (!query.strict || query.descriptor.is_none()) {
            return MatchOutcome::Found(candidates[0].clone());
        }

        let Some(descriptor) = query.descriptor.as_deref() else {
            return Self::ambiguous(parent, query, candidates.len());
        };

        let survivors: Vec<&DeclaredMemberRc> = match query.kind {
            MemberKind::Field => {
                if candidates.len() > 1 {
                    return Self::ambiguous(parent, query, candidates.len());
                }
                candidates
                    .into_iter()
                    .filter(|field| field.descriptor == descriptor)
                    .collect()
            }
            MemberKind::Method if query.strict => candidates
                .into_iter()
                .filter(|method| method.descriptor == descriptor)
                .collect(),
            MemberKind::Method => {
                let wanted = param_list(descriptor);
                candidates
                    .into_iter()
                    .filter(|method| param_list(&method.descriptor).eq_ignore_ascii_case(wanted))
                    .collect()
            }
        };

        match survivors.as_slice() {
            [] => Self::not_found(parent, query),
            [member] => MatchOutcome::Found((*member).clone()),
            _ => Self::ambiguous(parent, query, survivors.len()),
        }
    }

    /// Find the member of `class` that a query refers to
    ///
    /// ## Arguments
    /// * 'class' - The class to search
    /// * 'query' - What to look for
    pub fn resolve_in(class: &ClassInfo, query: &Query) -> MatchOutcome {
        Self::resolve(&class.name, class.members(), query)
    }

    /// Resolve many queries against one class in parallel
    ///
    /// The outcomes are returned in the order of `queries`.
    ///
    /// ## Arguments
    /// * 'class'   - The class to search
    /// * 'queries' - The queries to resolve
    pub fn resolve_batch(class: &ClassInfo, queries: &[Query]) -> Vec<MatchOutcome> {
        queries
            .par_iter()
            .map(|query| Self::resolve_in(class, query))
            .collect()
    }

    fn not_found(parent: &str, query: &Query) -> MatchOutcome {
        MatchOutcome::NotFound {
            kind: query.kind,
            name: query.to_string(),
            parent: parent.to_string(),
        }
    }

    fn ambiguous(parent: &str, query: &Query, count: usize) -> MatchOutcome {
        MatchOutcome::Ambiguous {
            count,
            name: query.name.clone(),
            parent: parent.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolver::Modifiers, test::foo_class};

    fn found_descriptor(outcome: MatchOutcome) -> String {
        match outcome {
            MatchOutcome::Found(member) => member.descriptor.clone(),
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn unique_name_needs_no_descriptor() {
        let class = foo_class();
        let outcome = SymbolResolver::resolve_in(&class, &Query::method("reset"));
        assert_eq!(found_descriptor(outcome), "()V");

        let outcome = SymbolResolver::resolve_in(&class, &Query::field("count"));
        assert_eq!(found_descriptor(outcome), "I");
    }

    #[test]
    fn loose_mode_ignores_descriptor_of_unique_name() {
        let class = foo_class();
        let query = Query::method("reset").with_descriptor("(J)Z");
        assert!(SymbolResolver::resolve_in(&class, &query).is_found());
    }

    #[test]
    fn strict_unique_name_checks_descriptor() {
        let class = foo_class();
        let query = Query::method("reset").with_descriptor("(J)Z").strict(true);
        assert!(matches!(
            SymbolResolver::resolve_in(&class, &query),
            MatchOutcome::NotFound { .. }
        ));

        let query = Query::method("reset").with_descriptor("()V").strict(true);
        assert!(SymbolResolver::resolve_in(&class, &query).is_found());

        // strict without descriptor falls back to the name
        let query = Query::method("reset").strict(true);
        assert!(SymbolResolver::resolve_in(&class, &query).is_found());
    }

    #[test]
    fn overloads_without_descriptor_are_ambiguous() {
        let class = foo_class();
        match SymbolResolver::resolve_in(&class, &Query::method("compute")) {
            MatchOutcome::Ambiguous { count, name, parent } => {
                assert_eq!(count, 2);
                assert_eq!(name, "compute");
                assert_eq!(parent, "pkg/Foo");
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn overloads_by_parameter_list() {
        let class = foo_class();
        let query = Query::method("compute").with_descriptor("(I)");
        assert_eq!(
            found_descriptor(SymbolResolver::resolve_in(&class, &query)),
            "(I)I"
        );

        // return type is ignored in loose mode
        let query = Query::method("compute").with_descriptor("()J");
        assert_eq!(
            found_descriptor(SymbolResolver::resolve_in(&class, &query)),
            "()I"
        );
    }

    #[test]
    fn overloads_by_full_descriptor() {
        let class = foo_class();
        let query = Query::method("compute").with_descriptor("()I").strict(true);
        assert_eq!(
            found_descriptor(SymbolResolver::resolve_in(&class, &query)),
            "()I"
        );

        let query = Query::method("compute").with_descriptor("()J").strict(true);
        match SymbolResolver::resolve_in(&class, &query) {
            MatchOutcome::NotFound { kind, name, .. } => {
                assert_eq!(kind, MemberKind::Method);
                assert_eq!(name, "compute ()J");
            }
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[test]
    fn parameter_list_ignores_ascii_case() {
        let class = ClassInfo::new("pkg/Case", None);
        class.declare_method("run", "(Lpkg/Foo;)V", Modifiers::PUBLIC);
        class.declare_method("run", "(J)V", Modifiers::PUBLIC);

        let query = Query::method("run").with_descriptor("(LPKG/FOO;)V");
        assert_eq!(
            found_descriptor(SymbolResolver::resolve_in(&class, &query)),
            "(Lpkg/Foo;)V"
        );
    }

    #[test]
    fn field_descriptor_is_verified() {
        let class = foo_class();
        let query = Query::field("count").with_descriptor("J").strict(true);
        assert!(matches!(
            SymbolResolver::resolve_in(&class, &query),
            MatchOutcome::NotFound { .. }
        ));

        let query = Query::field("count").with_descriptor("I").strict(true);
        assert!(SymbolResolver::resolve_in(&class, &query).is_found());
    }

    #[test]
    fn kind_separates_fields_and_methods() {
        let class = foo_class();
        assert!(matches!(
            SymbolResolver::resolve_in(&class, &Query::field("compute")),
            MatchOutcome::NotFound { .. }
        ));
        assert!(matches!(
            SymbolResolver::resolve_in(&class, &Query::method("count")),
            MatchOutcome::NotFound { .. }
        ));
    }

    #[test]
    fn batch_preserves_order() {
        let class = foo_class();
        let queries = vec![
            Query::method("compute").with_descriptor("(I)I"),
            Query::field("count"),
            Query::method("missing"),
            Query::method("compute"),
        ];

        let outcomes = SymbolResolver::resolve_batch(&class, &queries);
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].found().unwrap().descriptor, "(I)I");
        assert_eq!(outcomes[1].found().unwrap().name, "count");
        assert!(matches!(outcomes[2], MatchOutcome::NotFound { .. }));
        assert!(matches!(outcomes[3], MatchOutcome::Ambiguous { count: 2, .. }));
    }
}
