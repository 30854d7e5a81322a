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

use odin_igc::viterbi::*;
use odin_igc::{FlightMode, TrackMode};

// run with "cargo test --test test_viterbi -- --nocapture"

fn textbook_hmm ()->LogProbCosts {
    LogProbCosts::from_probabilities( [0.5, 0.5], [[0.9, 0.1], [0.1, 0.9]], [[0.7, 0.3], [0.3, 0.7]])
}

fn bits (v: &[u8])->Vec<Option<bool>> { v.iter().map( |b| Some(*b == 1)).collect() }
fn as_bits (v: &[bool])->Vec<u8> { v.iter().map( |b| *b as u8).collect() }

#[test]
fn test_hmm_decoding() {
    let costs = textbook_hmm();

    let cases: [(&[u8],&[u8]);3] = [
        (&[1,0,0,0,1,1,0,0,0], &[0,0,0,0,0,0,0,0,0]),
        (&[1,0,1,1,0,0,1,1,1], &[1,1,1,1,1,1,1,1,1]),
        (&[0,0,0,0,0,0,1,1,1,1,1,1,1], &[0,0,0,0,0,0,1,1,1,1,1,1,1]),
    ];

    for (input,expected) in cases {
        let output = as_bits( &smooth( &bits(input), &costs));
        println!("{:?} -> {:?}", input, output);
        assert_eq!( output.as_slice(), expected);
    }
}

#[test]
fn test_empty_and_constant() {
    let costs = textbook_hmm();
    assert!( smooth( &bits(&[]), &costs).is_empty());

    for b in [0u8, 1u8] {
        let input = vec![b; 17];
        let output = as_bits( &smooth( &bits(&input), &costs));
        assert_eq!( output, input);
    }

    // constant raw signals never produce flips, regardless of the switch cost
    for switch_cost in [0.01, 1.0, 10.0, 1000.0] {
        let costs = ThresholdCosts::new( 10.0, 1.0, switch_cost);
        for v in [3.0, 30.0] {
            let obs = vec![Some(v); 50];
            let output = smooth( &obs, &costs);
            assert_eq!( output.len(), obs.len());
            assert_eq!( transitions( &output), 0);
            assert!( output.iter().all( |s| *s == (v > 10.0)));
        }
    }
}

#[test]
fn test_threshold_smoothing() {
    // a single outlier is suppressed, a sustained change is not
    let mut raw = vec![0.0; 21];
    raw[10] = 50.0;
    raw.extend( [50.0; 10]);
    let obs: Vec<Option<f64>> = raw.iter().map( |v| Some(*v)).collect();
    let costs = ThresholdCosts::new( 15.0, 1.386, 7.6);

    let modes: Vec<FlightMode> = smooth_states( &obs, &costs);
    println!("{:?}", modes);

    assert_eq!( modes.len(), obs.len());
    assert!( modes[..21].iter().all( |m| *m == FlightMode::Stationary));
    assert!( modes[21..].iter().all( |m| *m == FlightMode::Moving));
    assert_eq!( transitions( &modes), 1);
}

#[test]
fn test_missing_observations() {
    let costs = ThresholdCosts::new( 10.0, 2.0, 3.0);

    // missing values follow their neighbours
    let obs = vec![None, Some(20.0), Some(20.0), None, None, Some(20.0), Some(20.0)];
    let output = smooth( &obs, &costs);
    assert!( output.iter().all( |s| *s));

    // nothing observed at all - ties resolve to the inactive state
    let obs: Vec<Option<f64>> = vec![None; 5];
    let output = smooth( &obs, &costs);
    assert_eq!( output, vec![false; 5]);
}

#[test]
fn test_switch_cost_monotonicity() {
    let obs: Vec<Option<f64>> = (0..200usize).map( |i| Some( ((i * 7919) % 23) as f64)).collect();

    let mut last_transitions = usize::MAX;
    for switch_cost in [0.0, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 40.0] {
        let output = smooth( &obs, &ThresholdCosts::new( 11.0, 1.0, switch_cost));
        let n = transitions( &output);
        println!("switch cost {:5.1} -> {} transitions", switch_cost, n);

        assert_eq!( output.len(), obs.len());
        assert!( n <= last_transitions);
        last_transitions = n;
    }
    assert_eq!( last_transitions, 0);
}

#[test]
fn test_determinism() {
    let obs: Vec<Option<f64>> = (0..100usize).map( |i| if i % 13 == 0 { None } else { Some( ((i * 31) % 17) as f64) }).collect();
    let costs = ThresholdCosts::new( 8.0, 1.0, 1.5);

    let a: Vec<TrackMode> = smooth_states( &obs, &costs);
    let b: Vec<TrackMode> = smooth_states( &obs, &costs);
    assert_eq!( a, b);
}

#[test]
fn test_runs() {
    let states = [1, 1, 0, 0, 0, 1];
    assert_eq!( runs( &states), vec![(1,0,1), (0,2,4), (1,5,5)]);
    assert!( runs::<u8>( &[]).is_empty());
    assert_eq!( transitions( &states), 2);
}
