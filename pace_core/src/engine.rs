//! Allocation engine for spreading remaining work across the days before a deadline.
//!
//! This module implements the planning logic:
//! - Enumerate the calendar days from today up to (not including) the deadline
//! - Weight the non-excluded days, flat or along the ease-in curve
//! - Round each share and push the rounding remainder onto the last effective day
//! - Group the effective days into up to four phases

use crate::curve::{clamp_intensity, weight};
use crate::dates::{add_days, days_between, weekday_index, weekday_name};
use crate::{AllocationPlan, AllocationRequest, DayAllocation, Distribution, PhaseSummary};

/// Phase names and symbols, in plan order
const PHASES: [(&str, &str); 4] = [
    ("Início", "🌱"),
    ("Ramp", "📈"),
    ("Pico", "🚀"),
    ("Final", "⭐"),
];

/// Compute the day-by-day plan for a request
///
/// ## Planning rules
///
/// 1. **Expiry**: a deadline on or before `today` yields an expired, empty plan.
///
/// 2. **Completion**: nothing remaining yields zero-filled days.
///
/// 3. **All days excluded**: every day gets 0 and `total_allocated` carries the
///    unallocated remaining quantity; callers detect this with `is_blocked()`.
///
/// 4. **Allocation**: each effective day gets `round(weight / sum * remaining)`,
///    then the difference to `remaining` is added to the last effective day.
///
/// Never fails and never reads the clock; identical requests give identical plans.
pub fn allocate(request: &AllocationRequest) -> AllocationPlan {
    let intensity = clamp_intensity(request.intensity);
    let remaining = request.remaining_quantity;
    let total_days = days_between(request.today, request.deadline);

    let mut plan = AllocationPlan {
        today: request.today,
        deadline: request.deadline,
        distribution: request.distribution,
        intensity,
        remaining_quantity: remaining,
        days: Vec::new(),
        total_allocated: 0,
        effective_day_count: 0,
        average_per_effective_day: 0.0,
        phases: Vec::new(),
        is_expired: false,
    };

    if total_days <= 0 {
        tracing::info!(
            "Deadline {} is not after {}, plan expired",
            request.deadline,
            request.today
        );
        plan.is_expired = true;
        return plan;
    }

    let mut days = enumerate_days(request, total_days);
    let effective = days.iter().filter(|d| !d.is_excluded).count();
    plan.effective_day_count = effective;

    if remaining == 0 {
        tracing::debug!("Nothing remaining, returning zero-filled plan");
        plan.days = days;
        return plan;
    }

    if effective == 0 {
        tracing::info!(
            "All {} days before {} are excluded, {} left unallocated",
            total_days,
            request.deadline,
            remaining
        );
        plan.total_allocated = remaining;
        plan.days = days;
        return plan;
    }

    let weights = raw_weights(&days, effective, request.distribution, intensity);
    let weight_sum: f64 = weights.iter().sum();

    let mut allocations: Vec<i64> = weights
        .iter()
        .map(|w| {
            if weight_sum > 0.0 {
                (w / weight_sum * remaining as f64).round() as i64
            } else {
                0
            }
        })
        .collect();

    reconcile(&mut allocations, &days, remaining as i64);

    let average = remaining as f64 / effective as f64;
    let mut cumulative: u32 = 0;
    for (day, allocated) in days.iter_mut().zip(allocations) {
        day.allocated = allocated as u32;
        cumulative += day.allocated;
        day.cumulative_allocated = cumulative;
        day.percent_of_average = if day.is_excluded {
            0
        } else {
            percent_of(day.allocated, average)
        };
    }

    plan.total_allocated = cumulative;
    plan.average_per_effective_day = average;
    plan.phases = build_phases(&days, average);
    plan.days = days;

    tracing::debug!(
        "Planned {} over {} days ({} effective, {} phases, {:.1}/day)",
        remaining,
        total_days,
        effective,
        plan.phases.len(),
        average
    );

    plan
}

/// Zero-filled days for the window, with exclusions and effective positions set
fn enumerate_days(request: &AllocationRequest, total_days: i64) -> Vec<DayAllocation> {
    let mut effective_index = 0;

    (0..total_days)
        .map(|offset| {
            let date = add_days(request.today, offset);
            let weekday = weekday_index(date);
            let is_excluded = request.excluded_weekdays.contains(&weekday);

            let index = if is_excluded {
                None
            } else {
                effective_index += 1;
                Some(effective_index)
            };

            DayAllocation {
                date,
                weekday,
                weekday_name: weekday_name(weekday).to_string(),
                allocated: 0,
                is_excluded,
                cumulative_allocated: 0,
                percent_of_average: 0,
                effective_index: index,
            }
        })
        .collect()
}

/// Weight per calendar day; excluded days do not consume a curve position
fn raw_weights(
    days: &[DayAllocation],
    effective: usize,
    distribution: Distribution,
    intensity: f64,
) -> Vec<f64> {
    days.iter()
        .map(|day| match (day.effective_index, distribution) {
            (None, _) => 0.0,
            (Some(_), Distribution::Linear) => 1.0,
            (Some(index), Distribution::Exponential) => weight(index - 1, effective, intensity),
        })
        .collect()
}

/// Make the allocations sum to `remaining` by adjusting the last effective day
///
/// A negative remainder larger than the last day's share spills backward over
/// earlier effective days so no day goes below zero.
fn reconcile(allocations: &mut [i64], days: &[DayAllocation], remaining: i64) {
    let mut diff = remaining - allocations.iter().sum::<i64>();
    if diff == 0 {
        return;
    }

    tracing::debug!("Rounding remainder {} applied from the last effective day", diff);

    for (i, day) in days.iter().enumerate().rev() {
        if day.is_excluded {
            continue;
        }

        let adjusted = allocations[i] + diff;
        if adjusted >= 0 {
            allocations[i] = adjusted;
            return;
        }

        allocations[i] = 0;
        diff = adjusted;
    }
}

/// `value` as a rounded percentage of `average`; 0 when the average is 0
fn percent_of(value: u32, average: f64) -> u32 {
    if average > 0.0 {
        (value as f64 / average * 100.0).round() as u32
    } else {
        0
    }
}

/// Split the effective days into `ceil(n / 4)`-sized phases
fn build_phases(days: &[DayAllocation], average: f64) -> Vec<PhaseSummary> {
    let effective: Vec<u32> = days
        .iter()
        .filter(|d| !d.is_excluded)
        .map(|d| d.allocated)
        .collect();

    if effective.is_empty() {
        return Vec::new();
    }

    let chunk_size = effective.len().div_ceil(PHASES.len());

    effective
        .chunks(chunk_size)
        .zip(PHASES)
        .enumerate()
        .map(|(i, (members, (name, symbol)))| {
            let start = i * chunk_size + 1;
            let total: u32 = members.iter().sum();
            let min = members.iter().copied().min().unwrap_or(0);
            let max = members.iter().copied().max().unwrap_or(0);

            PhaseSummary {
                name: name.to_string(),
                symbol: symbol.to_string(),
                start_day_index: start,
                end_day_index: start + members.len() - 1,
                average_per_day: total as f64 / members.len() as f64,
                total_allocated: total,
                percent_range_label: format!(
                    "{}%-{}%",
                    percent_of(min, average),
                    percent_of(max, average)
                ),
            }
        })
        .collect()
}
