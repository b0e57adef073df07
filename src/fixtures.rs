use crate::dfa::StateRecord;

/// A, B and C are pairwise distinguishable.
pub(crate) fn three_states() -> Vec<StateRecord> {
    vec![
        StateRecord::new("A", true, false)
            .with_transition("0", "B")
            .with_transition("1", "A"),
        StateRecord::new("B", false, false)
            .with_transition("0", "A")
            .with_transition("1", "C"),
        StateRecord::new("C", false, true)
            .with_transition("0", "C")
            .with_transition("1", "C"),
    ]
}

/// B and D are accepting with the same targets, they collapse into one state.
pub(crate) fn four_states() -> Vec<StateRecord> {
    vec![
        StateRecord::new("A", true, false)
            .with_transition("0", "B")
            .with_transition("1", "C"),
        StateRecord::new("B", false, true)
            .with_transition("0", "C")
            .with_transition("1", "A"),
        StateRecord::new("C", false, false)
            .with_transition("0", "C")
            .with_transition("1", "D"),
        StateRecord::new("D", false, true)
            .with_transition("0", "C")
            .with_transition("1", "A"),
    ]
}

/// Partial automaton of `a(b|c)*` with a duplicated loop state, an explicit dead state and an unreachable state.
pub(crate) fn partial_with_dead_states() -> Vec<StateRecord> {
    vec![
        StateRecord::new("s", true, false)
            .with_transition("a", "p")
            .with_transition("b", "dead"),
        StateRecord::new("p", false, true)
            .with_transition("b", "q")
            .with_transition("c", "p"),
        StateRecord::new("q", false, true)
            .with_transition("b", "p")
            .with_transition("c", "q"),
        StateRecord::new("dead", false, false)
            .with_transition("a", "dead")
            .with_transition("b", "dead")
            .with_transition("c", "dead"),
        StateRecord::new("lost", false, true).with_transition("a", "s"),
    ]
}

/// Binary numbers divisible by three, with every residue duplicated.
pub(crate) fn divisible_by_three() -> Vec<StateRecord> {
    let mut records = vec![];
    for copy in 0..2 {
        for residue in 0..3 {
            let name = format!("r{residue}_{copy}");
            let mut record = StateRecord::new(&name, residue == 0 && copy == 0, residue == 0);
            for bit in 0..2 {
                let target = (residue * 2 + bit) % 3;
                record = record.with_transition(
                    &bit.to_string(),
                    &format!("r{target}_{}", (copy + bit) % 2),
                );
            }
            records.push(record);
        }
    }
    records
}
