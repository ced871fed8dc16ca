use std::fmt::Debug;

use regex::Regex;

pub fn assert_re(pattern: &str, haystack: &str) {
    let re = Regex::new(pattern).unwrap();
    assert!(re.is_match(haystack), "{:?} did not match {:?}", haystack, re);
}

fn eprint_vecs<T: Debug>(left: &[T], right: &[T]) {
    let mut err_str = "left != right. left: [\n".to_string();
    for o in left {
        err_str += &format!("{:?},\n", o);
    }
    err_str += "] != right: [\n";
    for o in right {
        err_str += &format!("{:?},\n", o);
    }
    err_str += "]";
    eprintln!("{}", err_str);
}

pub fn assert_big_struct_eq<T: PartialEq + Debug>(left: T, right: T) {
    assert_eq!(left, right, "{:#?} != {:#?}", left, right);
}

pub fn assert_vec_eq<T: PartialEq + Debug>(left: Vec<T>, right: Vec<T>) {
    assert_vecr_eq(&left, &right);
}

/// Like assert_eq, but prints each element on its own line, and points out
/// the mismatching indexes.
pub fn assert_vecr_eq<T: PartialEq + Debug>(left: &[T], right: &[T]) {
    if left == right {
        return;
    }
    eprint_vecs(left, right);

    if left.len() != right.len() {
        panic!("size of left ({}) != size of right ({})", left.len(), right.len());
    }
    for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        if l != r {
            eprintln!("Mismatch at index {}:", i);
            eprintln!("left: {:#?} != right: {:#?}", l, r);
        }
    }
    panic!("left != right");
}

/// Compares text output line by line. Trailing newlines are not significant.
pub fn assert_lines_eq(left: &str, right: &str) {
    assert_vec_eq(
        left.trim_end_matches('\n').split('\n').collect(),
        right.trim_end_matches('\n').split('\n').collect(),
    );
}
