pub fn reduce_sum_of_x(this: &[f32]) -> f32 {
    let n = this.len();
    let mut x = 0.0f32;
    for i in 0..n {
        x += this[i];
    }
    x
}

pub fn reduce_sum_of_d2(lhs: &[f32], rhs: &[f32]) -> f32 {
    assert!(lhs.len() == rhs.len());
    let n = lhs.len();
    let mut d2 = 0.0f32;
    for i in 0..n {
        let d = lhs[i] - rhs[i];
        d2 += d * d;
    }
    d2
}

pub fn vector_add_inplace(this: &mut [f32], rhs: &[f32]) {
    assert!(this.len() == rhs.len());
    let n = this.len();
    for i in 0..n {
        this[i] += rhs[i];
    }
}

pub fn vector_mul_scalar(this: &[f32], scalar: f32) -> Vec<f32> {
    let n = this.len();
    let mut r = Vec::with_capacity(n);
    for i in 0..n {
        r.push(this[i] * scalar);
    }
    r
}
