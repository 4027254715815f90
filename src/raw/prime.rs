/// Returns `true` if `n` is prime.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    if n < 4 {
        return true;
    }

    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Every prime above 3 is of the form 6k ± 1.
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }

        i += 6;
    }

    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// Inputs below 2 round up to 2.
///
/// # Examples
///
/// ```
/// assert_eq!(dubhash::next_prime(50), 53);
/// assert_eq!(dubhash::next_prime(53), 53);
/// ```
pub fn next_prime(n: usize) -> usize {
    let mut n = n.max(2);
    while !is_prime(n) {
        n = n.checked_add(1).expect("capacity overflow");
    }
    n
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn next_prime_rounds_up() {
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(25), 29);
        assert_eq!(next_prime(50), 53);
        assert_eq!(next_prime(100), 101);
        assert_eq!(next_prime(200), 211);
    }

    #[test]
    fn next_prime_is_fixed_point() {
        for n in 1..2000 {
            let p = next_prime(n);
            assert!(p >= n);
            assert!(is_prime(p));
            assert_eq!(next_prime(p), p);
            assert!((n..p).all(|m| !is_prime(m)));
        }
    }

    #[test]
    fn squares_of_primes() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(7919 * 7919));
        assert!(is_prime(7919));
    }
}
