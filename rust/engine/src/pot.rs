use serde::{Deserialize, Serialize};

use crate::player::Seat;

/// One pot tier. The first tier returned by [`create_pot`] is the main pot,
/// the rest are side pots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Indices of the seats that may win this tier.
    pub eligibles: Vec<usize>,
}

/// Splits the round contributions into tiers, one per distinct contribution
/// level of the seats still contending, lowest first.
///
/// Folded seats fund every tier up to what they put in but are eligible for
/// none. Chips above the highest contending level stay in the last tier, so
/// the tiers always add up to the sum of all contributions.
///
/// ```
/// use pokeremu_engine::player::Seat;
/// use pokeremu_engine::pot::create_pot;
///
/// let mut short = Seat::new("a", "a", 0);
/// short.pay_info.amount = 500;
/// let mut deep = Seat::new("b", "b", 0);
/// deep.pay_info.amount = 1000;
///
/// let pots = create_pot(&[short, deep]);
/// assert_eq!(pots[0].amount, 1000);
/// assert_eq!(pots[1].amount, 500);
/// assert_eq!(pots[1].eligibles, vec![1]);
/// ```
pub fn create_pot(seats: &[Seat]) -> Vec<Pot> {
    let contenders: Vec<usize> = (0..seats.len()).filter(|&i| seats[i].is_active()).collect();
    let mut levels: Vec<u32> = contenders
        .iter()
        .map(|&i| seats[i].pay_info.amount)
        .filter(|&a| a > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    if levels.is_empty() {
        return vec![Pot {
            amount: seats.iter().map(|s| s.pay_info.amount).sum(),
            eligibles: contenders,
        }];
    }

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev = 0;
    for (tier, &level) in levels.iter().enumerate() {
        let last = tier + 1 == levels.len();
        let amount = seats
            .iter()
            .map(|s| {
                let paid = s.pay_info.amount;
                let upper = if last { paid } else { paid.min(level) };
                upper - paid.min(prev)
            })
            .sum();
        let eligibles = contenders
            .iter()
            .copied()
            .filter(|&i| seats[i].pay_info.amount >= level)
            .collect();
        pots.push(Pot { amount, eligibles });
        prev = level;
    }
    pots
}
