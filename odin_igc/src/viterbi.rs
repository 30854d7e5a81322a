/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

/// a generic two-state chain smoother (Viterbi decoder). It computes the label sequence with the minimum total
/// cost of per-sample emission costs plus label transition costs. Costs are additive and non-negative, which
/// covers both hand tuned threshold models ([`ThresholdCosts`]) and HMMs given as probabilities ([`LogProbCosts`]).
///
/// States are represented as `bool` (`false` is the inactive state, `true` the active one). Domain types map
/// onto this through [`TwoState`]. Missing observations (`None`) carry no emission cost, i.e. their label is
/// decided by the neighbours alone.

use serde::{Serialize,Deserialize};

/// a label type with exactly two values
pub trait TwoState: Copy + PartialEq {
    const INACTIVE: Self;
    const ACTIVE: Self;

    fn is_active (&self)->bool { *self == Self::ACTIVE }

    fn from_active (is_active: bool)->Self {
        if is_active { Self::ACTIVE } else { Self::INACTIVE }
    }

    fn opposite (&self)->Self {
        if self.is_active() { Self::INACTIVE } else { Self::ACTIVE }
    }
}

/// the cost model of a two-state chain over observations of type `O`
pub trait ChainCosts<O> {
    fn initial_cost (&self, state: bool)->f64;
    fn emission_cost (&self, state: bool, obs: &O)->f64;
    fn transition_cost (&self, from: bool, to: bool)->f64;
}

/* #region cost models ************************************************************************/

/// observations above `threshold` vote for the active state. A label that disagrees with the vote costs
/// `mismatch_cost`, each label switch costs `switch_cost`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct ThresholdCosts {
    pub threshold: f64,
    pub mismatch_cost: f64,
    pub switch_cost: f64,
}

impl ThresholdCosts {
    pub fn new (threshold: f64, mismatch_cost: f64, switch_cost: f64)->Self {
        ThresholdCosts { threshold, mismatch_cost, switch_cost }
    }
}

impl ChainCosts<f64> for ThresholdCosts {
    fn initial_cost (&self, _state: bool)->f64 { 0.0 }

    fn emission_cost (&self, state: bool, obs: &f64)->f64 {
        if (*obs > self.threshold) == state { 0.0 } else { self.mismatch_cost }
    }

    fn transition_cost (&self, from: bool, to: bool)->f64 {
        if from == to { 0.0 } else { self.switch_cost }
    }
}

/// a hidden Markov model with binary emissions, stored as negative natural logarithms of its probabilities.
/// Index 0 is the inactive state (or the `false` emission), index 1 the active state
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LogProbCosts {
    initial: [f64;2],
    transition: [[f64;2];2],
    emission: [[f64;2];2],
}

impl LogProbCosts {
    /// `transition[i][j]` is the probability of going from state i to state j, `emission[i][e]` the
    /// probability of state i emitting e. Zero probabilities become infinite costs
    pub fn from_probabilities (initial: [f64;2], transition: [[f64;2];2], emission: [[f64;2];2])->Self {
        let nl = |p: f64| -p.ln();
        LogProbCosts {
            initial: initial.map(nl),
            transition: transition.map( |row| row.map(nl)),
            emission: emission.map( |row| row.map(nl)),
        }
    }
}

impl ChainCosts<bool> for LogProbCosts {
    fn initial_cost (&self, state: bool)->f64 { self.initial[state as usize] }

    fn emission_cost (&self, state: bool, obs: &bool)->f64 { self.emission[state as usize][*obs as usize] }

    fn transition_cost (&self, from: bool, to: bool)->f64 { self.transition[from as usize][to as usize] }
}

/* #endregion cost models */

const STATES: [bool;2] = [false, true];

/// compute the minimum cost state sequence for the given observations. The result has the same length
/// as `observations`. Ties are resolved towards the inactive state
pub fn smooth<O,C> (observations: &[Option<O>], costs: &C)->Vec<bool> where C: ChainCosts<O> {
    let n = observations.len();
    if n == 0 { return Vec::new() }

    let emission = |state: bool, obs: &Option<O>| obs.as_ref().map_or( 0.0, |o| costs.emission_cost( state, o));

    // forward pass - acc[s] is the min cost of any path ending in state s at the current position,
    // back[i][s] the state at i-1 on that path
    let mut acc = STATES.map( |s| costs.initial_cost(s) + emission( s, &observations[0]));
    let mut back: Vec<[bool;2]> = Vec::with_capacity(n);
    back.push( [false,false]);

    for obs in &observations[1..] {
        let mut next = [0.0;2];
        let mut pred = [false;2];

        for s in STATES {
            let from_inactive = acc[0] + costs.transition_cost( false, s);
            let from_active = acc[1] + costs.transition_cost( true, s);

            let (c, p) = if from_active < from_inactive { (from_active, true) } else { (from_inactive, false) };
            next[s as usize] = c + emission( s, obs);
            pred[s as usize] = p;
        }

        acc = next;
        back.push( pred);
    }

    // backtrack
    let mut states = vec![false; n];
    let mut s = acc[1] < acc[0];
    for i in (0..n).rev() {
        states[i] = s;
        s = back[i][s as usize];
    }

    states
}

/// [`smooth`] for domain label types
pub fn smooth_states<S,O,C> (observations: &[Option<O>], costs: &C)->Vec<S> where S: TwoState, C: ChainCosts<O> {
    smooth( observations, costs).into_iter().map( S::from_active).collect()
}

/// number of label changes in a state sequence
pub fn transitions<S: PartialEq> (states: &[S])->usize {
    states.windows(2).filter( |w| w[0] != w[1]).count()
}

/// maximal runs of equal labels as (label, first index, last index) with inclusive indices
pub fn runs<S: Copy + PartialEq> (states: &[S])->Vec<(S,usize,usize)> {
    let mut list = Vec::new();
    let mut start = 0;

    for i in 1..=states.len() {
        if i == states.len() || states[i] != states[start] {
            list.push( (states[start], start, i-1));
            start = i;
        }
    }
    list
}
